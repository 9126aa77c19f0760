//! Error types for gramcov-config.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading `gramcov.toml`.
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {}: {source}", path.display())]
    #[diagnostic(code(gramcov::config::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("failed to parse config file {}: {source}", path.display())]
    #[diagnostic(code(gramcov::config::parse))]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation error.
    #[error("config validation error: {0}")]
    #[diagnostic(code(gramcov::config::invalid))]
    Validation(String),
}
