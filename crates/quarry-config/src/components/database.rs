//! Database connection settings

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// SQLite database settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatabaseConfig {
    /// Path to the database file (`~` is expanded at load time)
    pub path: Option<PathBuf>,
    /// Open connections with `PRAGMA query_only` so generated SQL cannot write
    #[serde(default = "default_true")]
    pub read_only: bool,
    /// Busy timeout in milliseconds
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_ms: u32,
}

fn default_true() -> bool {
    true
}

fn default_busy_timeout() -> u32 {
    5000
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            read_only: true,
            busy_timeout_ms: default_busy_timeout(),
        }
    }
}

impl DatabaseConfig {
    /// Config pointing at the given database file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Allow writes through this connection
    pub fn writable(mut self) -> Self {
        self.read_only = false;
        self
    }
}
