//! Error types for configuration loading

use std::path::PathBuf;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("IO error reading {path}: {error}")]
    Io {
        /// File that failed to load
        path: PathBuf,
        /// Underlying error message
        error: String,
    },

    /// Config file is not valid TOML or does not match the schema
    #[error("Parse error in {path}: {error}")]
    Parse {
        /// File that failed to parse
        path: PathBuf,
        /// Parser message
        error: String,
    },

    /// Referenced file was not found
    #[error("Referenced file not found: {0}")]
    ReferenceNotFound(PathBuf),

    /// Environment variable referenced as `{env:VAR}` is not set
    #[error("Environment variable not found: {var_name} (referenced as {{env:{var_name}}})")]
    EnvVarNotFound {
        /// Name of the environment variable
        var_name: String,
    },

    /// Value failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
