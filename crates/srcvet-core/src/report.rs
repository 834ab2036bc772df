use crate::ReviewError;
use srcvet_build::BuildOutcome;
use srcvet_schema::{ExtractedLayout, PackageIdentity};
use std::fs;
use std::path::Path;
use tracing::info;

/// Ordered sequence of rendered report lines.
///
/// Owned exclusively by the review session until handed to [`write_report`].
/// Supports appends and removal of the single trailing line only — backward
/// navigation never reaches deeper than that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewLog {
    lines: Vec<String>,
}

impl ReviewLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn extend(&mut self, lines: impl IntoIterator<Item = String>) {
        self.lines.extend(lines);
    }

    pub fn pop_last(&mut self) -> Option<String> {
        self.lines.pop()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The full report text, one line per entry with a trailing newline.
    pub fn render(&self) -> String {
        let mut text = self.lines.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        text
    }
}

/// Opening report section: package identity summary and member listing.
pub fn identity_section(identity: &PackageIdentity, layout: &ExtractedLayout) -> Vec<String> {
    let mut lines = vec![
        format!("Source package review for {}", identity.nvr()),
        format!("Generated by srcvet on {}", chrono::Utc::now().to_rfc3339()),
        String::new(),
        format!("Package:  {}", identity.name),
        format!("Version:  {}", identity.version),
        format!("Release:  {}", identity.release),
        format!("Spec:     {}", layout.spec_file),
        String::new(),
    ];

    lines.push("Sources:".to_owned());
    if layout.sources.is_empty() {
        lines.push("  (none)".to_owned());
    } else {
        lines.extend(layout.sources.iter().map(|s| format!("  {s}")));
    }

    lines.push("Patches:".to_owned());
    if layout.patches.is_empty() {
        lines.push("  (none)".to_owned());
    } else {
        lines.extend(layout.patches.iter().map(|p| format!("  {p}")));
    }

    lines
}

/// Build result section: one line per attempted target.
pub fn build_section(outcomes: &[BuildOutcome]) -> Vec<String> {
    let mut lines = vec![String::new(), "Build results:".to_owned()];
    if outcomes.is_empty() {
        lines.push("  (no builds attempted)".to_owned());
    } else {
        lines.extend(outcomes.iter().map(|o| format!("  {}", o.report_line())));
    }
    lines
}

/// Persist the final log text, truncating and overwriting any existing file.
///
/// There is no atomic-write guarantee; a failure to open or write aborts the
/// whole review with an I/O error.
pub fn write_report(path: &Path, log: &ReviewLog) -> Result<(), ReviewError> {
    fs::write(path, log.render())?;
    info!("report written to {}", path.display());
    Ok(())
}
