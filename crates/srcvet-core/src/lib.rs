//! Review orchestration core for srcvet.
//!
//! This crate ties the schema and build layers together: the recipe
//! consistency gate (`verify`), the working directory layout with its
//! exclusive lock (`workdir`), the review log and report assembly (`report`),
//! the interactive checklist state machine (`review`), and interrupt handling
//! (`concurrency`).

pub mod concurrency;
pub mod report;
pub mod review;
pub mod verify;
pub mod workdir;

pub use concurrency::{install_signal_handler, shutdown_requested, WorkdirLock};
pub use report::{build_section, identity_section, write_report, ReviewLog};
pub use review::{PromptSource, ReviewSession, SessionEnd};
pub use verify::{file_digest, verify_recipe};
pub use workdir::{copy_tree, Workdir};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("metadata error: {0}")]
    Metadata(#[from] srcvet_schema::MetadataError),
    #[error("checklist error: {0}")]
    Checklist(#[from] srcvet_schema::ChecklistError),
    #[error("config error: {0}")]
    Config(#[from] srcvet_schema::ConfigError),
    #[error("build error: {0}")]
    Build(#[from] srcvet_build::BuildError),
    #[error("packaged spec digest {packaged} does not match reference digest {reference}")]
    SpecMismatch { packaged: String, reference: String },
    #[error("working directory is locked by another review: {0}")]
    WorkdirLocked(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
