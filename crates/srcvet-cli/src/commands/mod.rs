pub mod checklist;
pub mod completions;
pub mod doctor;
pub mod review;

use indicatif::{ProgressBar, ProgressStyle};
use srcvet_schema::{parse_config_file, ToolConfig};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

pub fn json_pretty(value: &impl serde::Serialize) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization failed: {e}"))
}

pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .expect("valid template")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(msg.to_owned());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn spin_ok(pb: &ProgressBar, msg: &str) {
    pb.set_style(ProgressStyle::with_template("{msg}").expect("valid template"));
    pb.finish_with_message(format!("✓ {msg}"));
}

pub fn spin_fail(pb: &ProgressBar, msg: &str) {
    pb.set_style(ProgressStyle::with_template("{msg}").expect("valid template"));
    pb.finish_with_message(format!("✗ {msg}"));
}

fn config_home() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
}

pub fn default_config_path() -> Option<PathBuf> {
    config_home().map(|dir| dir.join("srcvet").join("config.toml"))
}

/// Load the tool configuration: an explicit `--config` path must exist and
/// parse; the default location is optional and silently falls back to
/// built-in defaults when absent.
pub fn load_config(explicit: Option<&Path>) -> Result<ToolConfig, String> {
    match explicit {
        Some(path) => parse_config_file(path).map_err(|e| format!("config error: {e}")),
        None => match default_config_path() {
            Some(path) if path.is_file() => {
                parse_config_file(&path).map_err(|e| format!("config error: {e}"))
            }
            _ => Ok(ToolConfig::default()),
        },
    }
}

/// Resolve the checklist template: explicit flag, then the user config
/// directory, then the system-wide location.
pub fn resolve_checklist(explicit: Option<&Path>) -> Result<PathBuf, String> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_owned());
        }
        return Err(format!(
            "checklist template not found: {}",
            path.display()
        ));
    }

    let mut candidates = Vec::new();
    if let Some(dir) = config_home() {
        candidates.push(dir.join("srcvet").join("checklist"));
    }
    candidates.push(PathBuf::from("/usr/share/srcvet/checklist"));

    candidates
        .into_iter()
        .find(|p| p.is_file())
        .ok_or_else(|| "no checklist template found (pass --checklist)".to_owned())
}
