//! Identity parsing, member classification, checklist model, and configuration for srcvet.
//!
//! This crate defines the schema layer: package identity extraction from archive
//! file names (`PackageIdentity`), classification of archive members into spec,
//! patch, and source files (`ExtractedLayout`), the compliance checklist model
//! and its plain-text loader (`Checklist`), the closed verdict enumeration
//! (`Verdict`), and the optional TOML tool configuration (`ToolConfig`).

pub mod checklist;
pub mod config;
pub mod identity;
pub mod layout;
pub mod verdict;

pub use checklist::{
    parse_checklist_file, parse_checklist_str, Category, Checklist, ChecklistError, ChecklistItem,
};
pub use config::{
    parse_config_file, parse_config_str, BuildSection, CommandsSection, ConfigError, ToolConfig,
};
pub use identity::{parse_identity, MetadataError, PackageIdentity};
pub use layout::{classify_members, ExtractedLayout};
pub use verdict::Verdict;
