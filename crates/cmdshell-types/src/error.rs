//! Error types for cmdshell.

use std::io;

/// Errors produced by the cmdshell framework.
///
/// Evaluation never fails; these surface only from registration and from
/// host-side setup such as loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("reserved command name: {0}")]
    ReservedName(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ShellError>;
