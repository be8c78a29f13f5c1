//! Zero-row value recovery settings

use serde::{Deserialize, Serialize};

/// A column whose stored values are candidates for literal correction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValueColumn {
    /// Table name
    pub table: String,
    /// Column name
    pub column: String,
}

impl ValueColumn {
    /// Create a new column reference
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }
}

/// Settings for the value-pattern recoverer
///
/// ```toml
/// [recovery]
/// columns = [
///     { table = "film", column = "title" },
///     { table = "category", column = "name" },
/// ]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecoveryConfig {
    /// Columns to scan for candidate values
    #[serde(default)]
    pub columns: Vec<ValueColumn>,
    /// Minimum fuzzy score a candidate must reach to replace a literal
    #[serde(default)]
    pub min_score: u32,
}
