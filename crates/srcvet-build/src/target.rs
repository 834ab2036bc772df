use serde::Serialize;
use std::fmt;

/// A requested non-local build backend plus its buildroot identifier.
///
/// The local rebuild carries no identifier and is represented as `None` at
/// the orchestrator call site. Each target is created from one requested
/// backend string and consumed by exactly one build attempt.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum BuildTarget {
    /// Isolated local build environment (e.g. a mock chroot).
    Chroot(String),
    /// Non-persistent remote build (e.g. a koji scratch build).
    Scratch(String),
}

impl BuildTarget {
    pub fn identifier(&self) -> &str {
        match self {
            Self::Chroot(id) | Self::Scratch(id) => id,
        }
    }
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chroot(id) => write!(f, "chroot build in {id}"),
            Self::Scratch(id) => write!(f, "scratch build for {id}"),
        }
    }
}

/// Human-readable label for a build attempt, local included.
pub fn describe(target: Option<&BuildTarget>) -> String {
    match target {
        None => "local rebuild".to_owned(),
        Some(t) => t.to_string(),
    }
}
