use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseToml(#[from] toml::de::Error),
    #[error("commands.{0} must not be empty")]
    EmptyCommand(&'static str),
}

/// Optional tool configuration, loaded from `srcvet.toml`.
///
/// Every field has a working default, so running without a config file is the
/// common case.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    #[serde(default)]
    pub commands: CommandsSection,
    #[serde(default)]
    pub build: BuildSection,
}

/// Backend command argv prefixes. The archive path and, where applicable,
/// the buildroot identifier are appended by the orchestrator.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CommandsSection {
    #[serde(default = "default_rebuild")]
    pub rebuild: Vec<String>,
    #[serde(default = "default_chroot")]
    pub chroot: Vec<String>,
    #[serde(default = "default_scratch")]
    pub scratch: Vec<String>,
}

impl Default for CommandsSection {
    fn default() -> Self {
        Self {
            rebuild: default_rebuild(),
            chroot: default_chroot(),
            scratch: default_scratch(),
        }
    }
}

/// Default build targets applied when the command line names none.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BuildSection {
    #[serde(default)]
    pub chroot_roots: Vec<String>,
    #[serde(default)]
    pub scratch_targets: Vec<String>,
}

fn default_rebuild() -> Vec<String> {
    vec!["rpmbuild".to_owned(), "--rebuild".to_owned()]
}

fn default_chroot() -> Vec<String> {
    vec!["mock".to_owned(), "-r".to_owned()]
}

fn default_scratch() -> Vec<String> {
    vec!["koji".to_owned(), "build".to_owned(), "--scratch".to_owned()]
}

impl ToolConfig {
    /// Reject configs that would leave a backend with no program to run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.commands.rebuild.is_empty() {
            return Err(ConfigError::EmptyCommand("rebuild"));
        }
        if self.commands.chroot.is_empty() {
            return Err(ConfigError::EmptyCommand("chroot"));
        }
        if self.commands.scratch.is_empty() {
            return Err(ConfigError::EmptyCommand("scratch"));
        }
        Ok(())
    }
}

pub fn parse_config_str(input: &str) -> Result<ToolConfig, ConfigError> {
    let config: ToolConfig = toml::from_str(input)?;
    config.validate()?;
    Ok(config)
}

pub fn parse_config_file(path: impl AsRef<Path>) -> Result<ToolConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config_str(&content)
}
