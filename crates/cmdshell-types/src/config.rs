//! Shell configuration loaded from TOML.

use std::path::Path;

use serde::Deserialize;

use crate::error::{ShellError, Result};

/// Host-facing settings for a shell session.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShellConfig {
    /// Prompt printed before each line is read.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Greeting printed once at startup. Empty disables it.
    #[serde(default = "default_banner")]
    pub banner: String,
    /// Print each command line back before its output.
    #[serde(default)]
    pub echo_commands: bool,
}

fn default_prompt() -> String {
    "> ".to_string()
}
fn default_banner() -> String {
    "cmdshell -- type 'help' to list commands".to_string()
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            banner: default_banner(),
            echo_commands: false,
        }
    }
}

impl ShellConfig {
    /// Parse a configuration from TOML source.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        if config.prompt.contains('\n') {
            return Err(ShellError::Config(
                "prompt must be a single line".to_string(),
            ));
        }
        Ok(config)
    }

    /// Load a configuration file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        log::debug!("Loaded shell config from {}", path.display());
        Ok(config)
    }
}
