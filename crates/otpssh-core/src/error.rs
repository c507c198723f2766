// ABOUTME: Error types for configuration loading using thiserror.
// ABOUTME: Distinguishes unreadable, unparsable and semantically invalid config.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the otpssh configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No explicit path and no home/config directory to derive one from.
    #[error("could not determine config path")]
    NoPath,

    /// Failed to read the config file from disk.
    #[error("failed to read config from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for the expected schema.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The config parsed but a field is missing or unusable.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Result type alias using ConfigError.
pub type Result<T> = std::result::Result<T, ConfigError>;
