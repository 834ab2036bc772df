use crate::BuildError;
use std::fs::File;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

/// Where an invocation's output streams are directed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    /// stdout and stderr interleaved into a single file.
    Combined(PathBuf),
    /// stderr captured to a file, stdout passed through to the terminal.
    StderrFile(PathBuf),
    /// Each stream captured to its own file.
    Split { stdout: PathBuf, stderr: PathBuf },
}

/// A fully-assembled external command: program plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Build an invocation from a configured argv prefix plus trailing
    /// arguments supplied by the orchestrator.
    pub fn from_argv(prefix: &[String], tail: &[&str]) -> Result<Self, BuildError> {
        let (program, base_args) = prefix.split_first().ok_or(BuildError::EmptyCommand)?;
        let mut args: Vec<String> = base_args.to_vec();
        args.extend(tail.iter().map(|s| (*s).to_owned()));
        Ok(Self {
            program: program.clone(),
            args,
        })
    }
}

/// Injected command-execution capability.
///
/// The orchestrator never spawns processes directly; it hands an [`Invocation`]
/// and an [`OutputSink`] to this trait, so tests can substitute a scripted
/// runner without invoking real build tooling.
pub trait CommandRunner {
    /// Run the command to completion, redirecting streams per `sink`.
    ///
    /// Returns whether the process exited with status zero. A failure to
    /// spawn the process or to open a capture file is an error; a non-zero
    /// exit is not.
    fn run(&self, invocation: &Invocation, sink: &OutputSink) -> Result<bool, BuildError>;
}

/// Production runner backed by `std::process::Command`.
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation, sink: &OutputSink) -> Result<bool, BuildError> {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        command.stdin(Stdio::null());

        match sink {
            OutputSink::Combined(path) => {
                let file = File::create(path)?;
                let clone = file.try_clone()?;
                command.stdout(Stdio::from(file));
                command.stderr(Stdio::from(clone));
            }
            OutputSink::StderrFile(path) => {
                command.stdout(Stdio::inherit());
                command.stderr(Stdio::from(File::create(path)?));
            }
            OutputSink::Split { stdout, stderr } => {
                command.stdout(Stdio::from(File::create(stdout)?));
                command.stderr(Stdio::from(File::create(stderr)?));
            }
        }

        let status = command.status()?;
        debug!(
            "{} {} exited with {status}",
            invocation.program,
            invocation.args.join(" ")
        );
        Ok(status.success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_argv_splits_program_and_args() {
        let prefix = vec!["mock".to_owned(), "-r".to_owned()];
        let inv = Invocation::from_argv(&prefix, &["fedora-20", "foo.src.rpm"]).unwrap();
        assert_eq!(inv.program, "mock");
        assert_eq!(inv.args, vec!["-r", "fedora-20", "foo.src.rpm"]);
    }

    #[test]
    fn from_argv_rejects_empty_prefix() {
        assert!(matches!(
            Invocation::from_argv(&[], &["x"]),
            Err(BuildError::EmptyCommand)
        ));
    }

    #[test]
    fn process_runner_reports_exit_status() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("out.log");

        let ok = Invocation {
            program: "true".to_owned(),
            args: vec![],
        };
        assert!(ProcessRunner
            .run(&ok, &OutputSink::Combined(log.clone()))
            .unwrap());

        let fail = Invocation {
            program: "false".to_owned(),
            args: vec![],
        };
        assert!(!ProcessRunner.run(&fail, &OutputSink::Combined(log)).unwrap());
    }

    #[test]
    fn process_runner_captures_combined_output() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("combined.log");

        let inv = Invocation {
            program: "sh".to_owned(),
            args: vec![
                "-c".to_owned(),
                "echo to-stdout; echo to-stderr >&2".to_owned(),
            ],
        };
        assert!(ProcessRunner
            .run(&inv, &OutputSink::Combined(log.clone()))
            .unwrap());

        let captured = std::fs::read_to_string(&log).unwrap();
        assert!(captured.contains("to-stdout"));
        assert!(captured.contains("to-stderr"));
    }

    #[test]
    fn process_runner_splits_streams() {
        let dir = tempfile::tempdir().unwrap();
        let stdout = dir.path().join("out");
        let stderr = dir.path().join("err");

        let inv = Invocation {
            program: "sh".to_owned(),
            args: vec![
                "-c".to_owned(),
                "echo to-stdout; echo to-stderr >&2".to_owned(),
            ],
        };
        ProcessRunner
            .run(
                &inv,
                &OutputSink::Split {
                    stdout: stdout.clone(),
                    stderr: stderr.clone(),
                },
            )
            .unwrap();

        assert_eq!(std::fs::read_to_string(&stdout).unwrap(), "to-stdout\n");
        assert_eq!(std::fs::read_to_string(&stderr).unwrap(), "to-stderr\n");
    }

    #[test]
    fn process_runner_spawn_failure_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let inv = Invocation {
            program: "srcvet-no-such-program".to_owned(),
            args: vec![],
        };
        let result = ProcessRunner.run(&inv, &OutputSink::Combined(dir.path().join("log")));
        assert!(matches!(result, Err(BuildError::Io(_))));
    }
}
