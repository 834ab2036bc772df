use super::{json_pretty, resolve_checklist, spin_fail, spin_ok, spinner, EXIT_FAILURE, EXIT_SUCCESS};
use crate::prompts::TerminalPrompts;
use srcvet_build::{
    list_members, unpack_archive, BuildOutcome, BuildTarget, Orchestrator, ProcessRunner,
};
use srcvet_core::{
    build_section, copy_tree, identity_section, shutdown_requested, verify_recipe, write_report,
    ReviewLog, ReviewSession, SessionEnd, Workdir, WorkdirLock,
};
use srcvet_schema::{classify_members, parse_checklist_file, parse_identity, ToolConfig};
use std::io::{stdin, IsTerminal};
use std::path::PathBuf;
use tracing::info;

pub struct ReviewRequest {
    pub archive: PathBuf,
    pub recipe: PathBuf,
    pub chroots: Vec<String>,
    pub scratches: Vec<String>,
    pub checklist: Option<PathBuf>,
    pub workdir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub skip_local: bool,
    pub assume_yes: bool,
}

pub fn run(request: &ReviewRequest, config: &ToolConfig, json: bool) -> Result<u8, String> {
    // Cheap validation first: nothing below spends build time.
    if !request.archive.is_file() {
        return Err(format!(
            "input package not found: {}",
            request.archive.display()
        ));
    }
    if !request.recipe.is_file() {
        return Err(format!(
            "reference recipe not found: {}",
            request.recipe.display()
        ));
    }
    let checklist_path = resolve_checklist(request.checklist.as_deref())?;
    let checklist = parse_checklist_file(&checklist_path).map_err(|e| e.to_string())?;

    let file_name = request
        .archive
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| format!("input package has no file name: {}", request.archive.display()))?;
    let identity = parse_identity(&file_name).map_err(|e| e.to_string())?;

    let workdir = Workdir::new(
        request
            .workdir
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("srcvet-{}", identity.name))),
    );
    workdir.initialize().map_err(|e| e.to_string())?;
    let _lock = WorkdirLock::acquire(&workdir.lock_file()).map_err(|e| e.to_string())?;

    // Extraction scratch space is owned by this TempDir and removed on exit,
    // normal or abnormal.
    let scratch = tempfile::tempdir().map_err(|e| format!("create extraction dir: {e}"))?;
    let pb = spinner("unpacking source archive...");
    let tree = match unpack_archive(&request.archive, scratch.path()) {
        Ok(tree) => {
            spin_ok(&pb, "source archive unpacked");
            tree
        }
        Err(e) => {
            spin_fail(&pb, "unpack failed");
            return Err(e.to_string());
        }
    };
    let members = list_members(&tree).map_err(|e| e.to_string())?;

    let layout = classify_members(&identity, &members).map_err(|e| e.to_string())?;

    // Consistency gate: the packaged recipe must be byte-identical to the
    // reference before any build resources are spent.
    let packaged_spec = members
        .iter()
        .find(|m| m.rsplit('/').next() == Some(layout.spec_file.as_str()))
        .map(|m| tree.join(m))
        .ok_or_else(|| format!("spec member {} vanished after extraction", layout.spec_file))?;
    verify_recipe(&packaged_spec, &request.recipe).map_err(|e| e.to_string())?;
    if !json {
        println!("recipe verified against {}", request.recipe.display());
    }

    let staged = copy_tree(&tree, &workdir.sources_dir()).map_err(|e| e.to_string())?;
    info!("staged {staged} files into {}", workdir.sources_dir().display());

    let outcomes = run_builds(request, config, &workdir)?;

    let mut log = ReviewLog::new();
    log.extend(identity_section(&identity, &layout));
    log.extend(build_section(&outcomes));

    let mut prompts = TerminalPrompts;
    let (log, end) = ReviewSession::new(checklist, log)
        .run(&mut prompts)
        .map_err(|e| e.to_string())?;

    let output = request
        .output
        .clone()
        .unwrap_or_else(|| workdir.report_path());
    write_report(&output, &log).map_err(|e| e.to_string())?;

    if json {
        let payload = serde_json::json!({
            "package": identity,
            "builds": outcomes,
            "report": output.display().to_string(),
            "completed": end == SessionEnd::Completed,
        });
        println!("{}", json_pretty(&payload)?);
    } else {
        println!("report written to {}", output.display());
        if end == SessionEnd::Aborted {
            eprintln!("review ended early; the report is partial");
        }
    }

    Ok(match end {
        SessionEnd::Completed => EXIT_SUCCESS,
        SessionEnd::Aborted => EXIT_FAILURE,
    })
}

/// Drive the requested build targets strictly in order: local rebuild first,
/// then each chroot root, then each scratch target. Each non-local group
/// runs only after an explicit reviewer confirmation.
fn run_builds(
    request: &ReviewRequest,
    config: &ToolConfig,
    workdir: &Workdir,
) -> Result<Vec<BuildOutcome>, String> {
    let orchestrator = Orchestrator::new(
        Box::new(ProcessRunner),
        workdir.build_dir(),
        config.commands.clone(),
    );

    let chroots = if request.chroots.is_empty() {
        config.build.chroot_roots.clone()
    } else {
        request.chroots.clone()
    };
    let scratches = if request.scratches.is_empty() {
        config.build.scratch_targets.clone()
    } else {
        request.scratches.clone()
    };

    let mut outcomes = Vec::new();

    if !request.skip_local && !shutdown_requested() {
        outcomes.push(attempt(&orchestrator, request, None)?);
    }

    if !chroots.is_empty() && confirm("run chroot builds?", request.assume_yes)? {
        for id in &chroots {
            if shutdown_requested() {
                break;
            }
            let target = BuildTarget::Chroot(id.clone());
            outcomes.push(attempt(&orchestrator, request, Some(&target))?);
        }
    }

    if !scratches.is_empty() && confirm("run remote scratch builds?", request.assume_yes)? {
        for id in &scratches {
            if shutdown_requested() {
                break;
            }
            let target = BuildTarget::Scratch(id.clone());
            outcomes.push(attempt(&orchestrator, request, Some(&target))?);
        }
    }

    Ok(outcomes)
}

fn attempt(
    orchestrator: &Orchestrator,
    request: &ReviewRequest,
    target: Option<&BuildTarget>,
) -> Result<BuildOutcome, String> {
    let label = srcvet_build::describe(target);
    let pb = spinner(&format!("{label}..."));
    let outcome = orchestrator
        .attempt(&request.archive, target)
        .map_err(|e| e.to_string())?;
    if outcome.succeeded {
        spin_ok(&pb, &format!("{label}: OK"));
    } else {
        spin_fail(
            &pb,
            &format!("{label}: FAILED (see {})", outcome.log_path.display()),
        );
    }
    Ok(outcome)
}

fn confirm(prompt: &str, assume_yes: bool) -> Result<bool, String> {
    if assume_yes {
        return Ok(true);
    }
    if !stdin().is_terminal() {
        // Without a terminal there is nobody to ask; the group is skipped
        // rather than assumed.
        eprintln!("skipping: {prompt} (no terminal; pass --assume-yes to run)");
        return Ok(false);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()
        .map_err(|e| format!("prompt failed: {e}"))
}
