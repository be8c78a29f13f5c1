//! Error types for SQLite access

use quarry_core::RecoveryError;
use thiserror::Error;

/// SQLite error type
#[derive(Error, Debug)]
pub enum SqliteError {
    /// Database could not be opened or configured
    #[error("Connection error: {0}")]
    Connection(String),

    /// Schema introspection failed
    #[error("Schema error: {0}")]
    Schema(String),

    /// Blocking task panicked or was cancelled
    #[error("Task error: {0}")]
    Task(String),

    /// Underlying rusqlite error
    #[error("SQLite error: {0}")]
    Rusqlite(#[from] rusqlite::Error),
}

/// Result type for SQLite operations
pub type SqliteResult<T> = Result<T, SqliteError>;

impl From<SqliteError> for RecoveryError {
    fn from(err: SqliteError) -> Self {
        RecoveryError::Lookup(err.to_string())
    }
}
