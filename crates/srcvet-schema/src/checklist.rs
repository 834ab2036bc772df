use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChecklistError {
    #[error("failed to read checklist file: {0}")]
    Io(#[from] std::io::Error),
}

/// Checklist grouping: mandatory vs. recommended items.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Must,
    Should,
}

/// One reviewable compliance statement. Read-only to the review core.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChecklistItem {
    pub category: Category,
    pub text: String,
}

/// An ordered compliance checklist, split into its MUST and SHOULD groups.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Checklist {
    pub must: Vec<ChecklistItem>,
    pub should: Vec<ChecklistItem>,
}

impl Checklist {
    pub fn len(&self) -> usize {
        self.must.len() + self.should.len()
    }

    pub fn is_empty(&self) -> bool {
        self.must.is_empty() && self.should.is_empty()
    }
}

/// Parse checklist rows from plain text.
///
/// Each line is a two-column row: the first whitespace-delimited token is the
/// category marker (matched case-insensitively against `MUST`/`SHOULD`), the
/// rest of the line is the item text. Rows matching neither marker are
/// ignored, so templates may carry comments and blank lines freely.
pub fn parse_checklist_str(input: &str) -> Checklist {
    let mut checklist = Checklist::default();

    for line in input.lines() {
        let trimmed = line.trim();
        let (marker, text) = match trimmed.split_once(char::is_whitespace) {
            Some((marker, rest)) => (marker, rest.trim()),
            None => (trimmed, ""),
        };
        let item = |category| ChecklistItem {
            category,
            text: text.to_owned(),
        };
        match marker.to_lowercase().as_str() {
            "must" => checklist.must.push(item(Category::Must)),
            "should" => checklist.should.push(item(Category::Should)),
            _ => {}
        }
    }

    checklist
}

pub fn parse_checklist_file(path: impl AsRef<Path>) -> Result<Checklist, ChecklistError> {
    let content = fs::read_to_string(path)?;
    Ok(parse_checklist_str(&content))
}
