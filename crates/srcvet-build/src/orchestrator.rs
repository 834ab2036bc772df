use crate::runner::{CommandRunner, Invocation, OutputSink};
use crate::target::{describe, BuildTarget};
use crate::BuildError;
use serde::Serialize;
use srcvet_schema::CommandsSection;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Result of one build attempt. Produced exactly once per target; a failed
/// attempt is never retried by the orchestrator.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BuildOutcome {
    pub target: Option<BuildTarget>,
    pub succeeded: bool,
    /// The captured diagnostic stream: the combined log for the local
    /// rebuild, stderr for chroot and scratch builds.
    pub log_path: PathBuf,
}

impl BuildOutcome {
    /// One report line, e.g. `local rebuild: OK` or
    /// `chroot build in epel-7: FAILED (see build/epel-7.stderr)`.
    pub fn report_line(&self) -> String {
        let label = describe(self.target.as_ref());
        if self.succeeded {
            format!("{label}: OK")
        } else {
            format!("{label}: FAILED (see {})", self.log_path.display())
        }
    }
}

/// Sequential multi-backend build driver.
///
/// Runs one attempt per target through the injected [`CommandRunner`],
/// capturing output under the results directory. Success is determined
/// solely by the process exit status; captured output is never inspected,
/// so a backend that exits zero while emitting warnings still counts as a
/// success.
pub struct Orchestrator {
    runner: Box<dyn CommandRunner>,
    build_dir: PathBuf,
    commands: CommandsSection,
}

impl Orchestrator {
    pub fn new(
        runner: Box<dyn CommandRunner>,
        build_dir: impl Into<PathBuf>,
        commands: CommandsSection,
    ) -> Self {
        Self {
            runner,
            build_dir: build_dir.into(),
            commands,
        }
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Attempt one build against the given target (`None` = local rebuild).
    ///
    /// The results directory is created idempotently before the attempt. A
    /// non-zero backend exit yields `succeeded = false`, not an error; the
    /// decision to proceed to further targets belongs to the caller.
    pub fn attempt(
        &self,
        archive: &Path,
        target: Option<&BuildTarget>,
    ) -> Result<BuildOutcome, BuildError> {
        fs::create_dir_all(&self.build_dir)?;

        let archive_arg = archive.display().to_string();
        let (invocation, sink, log_path) = match target {
            None => {
                let log = self.build_dir.join("local.log");
                (
                    Invocation::from_argv(&self.commands.rebuild, &[archive_arg.as_str()])?,
                    OutputSink::Combined(log.clone()),
                    log,
                )
            }
            Some(BuildTarget::Chroot(id)) => {
                let log = self.build_dir.join(format!("{id}.stderr"));
                (
                    Invocation::from_argv(&self.commands.chroot, &[id.as_str(), archive_arg.as_str()])?,
                    OutputSink::StderrFile(log.clone()),
                    log,
                )
            }
            Some(BuildTarget::Scratch(id)) => {
                let stdout = self.build_dir.join(format!("scratch.{id}.stdout"));
                let stderr = self.build_dir.join(format!("scratch.{id}.stderr"));
                (
                    Invocation::from_argv(&self.commands.scratch, &[id.as_str(), archive_arg.as_str()])?,
                    OutputSink::Split {
                        stdout,
                        stderr: stderr.clone(),
                    },
                    stderr,
                )
            }
        };

        info!("attempting {}", describe(target));
        debug!("running {} {}", invocation.program, invocation.args.join(" "));
        let succeeded = self.runner.run(&invocation, &sink)?;
        if !succeeded {
            info!("{} failed, log at {}", describe(target), log_path.display());
        }

        Ok(BuildOutcome {
            target: target.cloned(),
            succeeded,
            log_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    /// Scripted runner: pops one pre-arranged exit result per call and
    /// records every invocation it saw into a shared log.
    struct ScriptedRunner {
        results: RefCell<VecDeque<bool>>,
        calls: Rc<RefCell<Vec<(Invocation, OutputSink)>>>,
    }

    impl ScriptedRunner {
        fn new(results: &[bool]) -> Self {
            Self {
                results: RefCell::new(results.iter().copied().collect()),
                calls: Rc::new(RefCell::new(Vec::new())),
            }
        }

        fn calls(&self) -> Rc<RefCell<Vec<(Invocation, OutputSink)>>> {
            Rc::clone(&self.calls)
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn run(&self, invocation: &Invocation, sink: &OutputSink) -> Result<bool, BuildError> {
            self.calls
                .borrow_mut()
                .push((invocation.clone(), sink.clone()));
            Ok(self.results.borrow_mut().pop_front().expect("unscripted call"))
        }
    }

    fn orchestrator(dir: &Path, results: &[bool]) -> Orchestrator {
        Orchestrator::new(
            Box::new(ScriptedRunner::new(results)),
            dir.join("build"),
            CommandsSection::default(),
        )
    }

    #[test]
    fn local_rebuild_uses_combined_fixed_path() {
        let dir = tempfile::tempdir().unwrap();
        let orch = orchestrator(dir.path(), &[true]);

        let outcome = orch.attempt(Path::new("foo-1.2-3.src.rpm"), None).unwrap();
        assert!(outcome.succeeded);
        assert!(outcome.target.is_none());
        assert_eq!(outcome.log_path, dir.path().join("build").join("local.log"));
    }

    #[test]
    fn chroot_build_is_namespaced_by_identifier() {
        let dir = tempfile::tempdir().unwrap();
        let orch = orchestrator(dir.path(), &[false]);
        let target = BuildTarget::Chroot("fedora-20-x86_64".to_owned());

        let outcome = orch
            .attempt(Path::new("foo-1.2-3.src.rpm"), Some(&target))
            .unwrap();
        assert!(!outcome.succeeded);
        assert_eq!(
            outcome.log_path,
            dir.path().join("build").join("fedora-20-x86_64.stderr")
        );
    }

    #[test]
    fn scratch_build_captures_both_streams() {
        let dir = tempfile::tempdir().unwrap();
        let runner = Box::new(ScriptedRunner::new(&[true]));
        let orch = Orchestrator::new(runner, dir.path().join("build"), CommandsSection::default());
        let target = BuildTarget::Scratch("rawhide".to_owned());

        let outcome = orch
            .attempt(Path::new("foo-1.2-3.src.rpm"), Some(&target))
            .unwrap();
        assert_eq!(
            outcome.log_path,
            dir.path().join("build").join("scratch.rawhide.stderr")
        );
    }

    #[test]
    fn outcome_mirrors_exit_status_per_backend_kind() {
        let dir = tempfile::tempdir().unwrap();
        let orch = orchestrator(dir.path(), &[false, true, false]);
        let archive = Path::new("foo-1.2-3.src.rpm");

        let chroot = BuildTarget::Chroot("epel-7".to_owned());
        let scratch = BuildTarget::Scratch("rawhide".to_owned());

        assert!(!orch.attempt(archive, None).unwrap().succeeded);
        assert!(orch.attempt(archive, Some(&chroot)).unwrap().succeeded);
        assert!(!orch.attempt(archive, Some(&scratch)).unwrap().succeeded);
    }

    #[test]
    fn invocations_carry_identifier_then_archive() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ScriptedRunner::new(&[true]);
        let calls = runner.calls();
        let orch = Orchestrator::new(
            Box::new(runner),
            dir.path().join("build"),
            CommandsSection::default(),
        );
        let target = BuildTarget::Chroot("epel-7".to_owned());
        orch.attempt(Path::new("pkg.src.rpm"), Some(&target)).unwrap();

        let recorded = calls.borrow();
        let (invocation, sink) = &recorded[0];
        assert_eq!(invocation.program, "mock");
        assert_eq!(invocation.args, vec!["-r", "epel-7", "pkg.src.rpm"]);
        assert!(matches!(sink, OutputSink::StderrFile(_)));
    }

    #[test]
    fn results_directory_creation_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("build")).unwrap();
        let orch = orchestrator(dir.path(), &[true, true]);
        let archive = Path::new("foo-1.2-3.src.rpm");

        orch.attempt(archive, None).unwrap();
        orch.attempt(archive, None).unwrap();
    }

    #[test]
    fn report_line_names_the_log_on_failure() {
        let outcome = BuildOutcome {
            target: Some(BuildTarget::Chroot("epel-7".to_owned())),
            succeeded: false,
            log_path: PathBuf::from("build/epel-7.stderr"),
        };
        assert_eq!(
            outcome.report_line(),
            "chroot build in epel-7: FAILED (see build/epel-7.stderr)"
        );

        let ok = BuildOutcome {
            target: None,
            succeeded: true,
            log_path: PathBuf::from("build/local.log"),
        };
        assert_eq!(ok.report_line(), "local rebuild: OK");
    }
}
