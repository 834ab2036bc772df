//! Build execution layer for srcvet.
//!
//! This crate implements everything that talks to external build tooling: the
//! injected `CommandRunner` capability with stream capture, the `BuildTarget`
//! model, the sequential `Orchestrator` driving one attempt per target, source
//! archive unpacking, and prerequisite checking for the backend commands.

pub mod archive;
pub mod orchestrator;
pub mod prereq;
pub mod runner;
pub mod target;

pub use archive::{list_members, unpack_archive};
pub use orchestrator::{BuildOutcome, Orchestrator};
pub use prereq::{check_review_prereqs, format_missing, MissingPrereq};
pub use runner::{CommandRunner, Invocation, OutputSink, ProcessRunner};
pub use target::{describe, BuildTarget};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("build I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("backend command is empty")]
    EmptyCommand,
    #[error("archive extraction failed: {0}")]
    ExtractFailed(String),
}
