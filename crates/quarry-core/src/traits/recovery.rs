//! Zero-row value recovery abstraction
//!
//! When a query runs cleanly but matches nothing, the usual culprit is a
//! literal that does not match stored data (`'Star Wars'` vs `'STAR WARS'`).
//! A [`ValueRecoverer`] rewrites such literals using values that actually
//! exist.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors while proposing a rewritten query
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecoveryError {
    /// Candidate values could not be loaded
    #[error("value lookup failed: {0}")]
    Lookup(String),

    /// The query could not be rewritten
    #[error("query rewrite failed: {0}")]
    Rewrite(String),
}

/// Result type for recovery operations
pub type RecoveryResult<T> = Result<T, RecoveryError>;

/// One replaced literal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueSuggestion {
    /// Literal as written in the query
    pub original: String,
    /// Stored value that replaced it
    pub replacement: String,
    /// Table the replacement came from
    pub table: String,
    /// Column the replacement came from
    pub column: String,
    /// Match score (higher is closer)
    pub score: u32,
}

impl fmt::Display for ValueSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' -> '{}' ({}.{})",
            self.original, self.replacement, self.table, self.column
        )
    }
}

/// A rewritten query plus what changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecoveredQuery {
    /// Query to run instead
    pub sql: String,
    /// Replacements applied, empty when nothing matched
    pub suggestions: Vec<ValueSuggestion>,
}

impl RecoveredQuery {
    /// A "recovery" that leaves the query as it was
    pub fn unchanged(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            suggestions: Vec::new(),
        }
    }
}

/// Rewrites a zero-row query into one likely to match stored values
#[async_trait]
pub trait ValueRecoverer: Send + Sync {
    /// Propose a replacement for `sql`
    async fn recover_query(&self, sql: &str) -> RecoveryResult<RecoveredQuery>;
}
