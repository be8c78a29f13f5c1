//! Zero-row value recovery
//!
//! A query that runs but matches nothing often spells a stored value
//! differently (`'zorro ark'` against `'ZORRO ARK'`). The recoverer loads the
//! distinct values of configured text columns and rewrites string literals
//! that are not stored verbatim to the closest stored value.

mod literals;
mod matcher;

pub use literals::{rewrite_literals, CandidateColumn};
pub use matcher::ValueScorer;

use crate::connection::SqliteConnector;
use crate::error::SqliteError;
use crate::schema::quote_identifier;
use async_trait::async_trait;
use quarry_config::{RecoveryConfig, ValueColumn};
use quarry_core::{RecoveredQuery, RecoveryError, RecoveryResult, ValueRecoverer};
use rusqlite::types::ValueRef;
use rusqlite::Connection;
use tracing::debug;

/// Rewrites mismatched literals using values stored in the database
#[derive(Debug, Clone)]
pub struct ValuePatternRecoverer {
    connector: SqliteConnector,
    columns: Vec<ValueColumn>,
    min_score: u32,
}

impl ValuePatternRecoverer {
    pub fn new(connector: SqliteConnector, config: &RecoveryConfig) -> Self {
        Self {
            connector,
            columns: config.columns.clone(),
            min_score: config.min_score,
        }
    }

    /// Columns whose values feed the matcher
    pub fn columns(&self) -> &[ValueColumn] {
        &self.columns
    }
}

#[async_trait]
impl ValueRecoverer for ValuePatternRecoverer {
    async fn recover_query(&self, sql: &str) -> RecoveryResult<RecoveredQuery> {
        if self.columns.is_empty() {
            return Ok(RecoveredQuery::unchanged(sql));
        }

        let columns = self.columns.clone();
        let candidates = self
            .connector
            .with_connection(|e: SqliteError| RecoveryError::from(e), move |conn| {
                load_candidates(conn, &columns)
            })
            .await?;

        let recovered = rewrite_literals(sql, &candidates, self.min_score);
        debug!(
            suggestions = recovered.suggestions.len(),
            "Value recovery finished"
        );
        Ok(recovered)
    }
}

/// Distinct non-null text values of each column
fn load_candidates(
    conn: &Connection,
    columns: &[ValueColumn],
) -> RecoveryResult<Vec<CandidateColumn>> {
    columns
        .iter()
        .map(|target| {
            let sql = format!(
                "SELECT DISTINCT {column} FROM {table} WHERE {column} IS NOT NULL",
                column = quote_identifier(&target.column),
                table = quote_identifier(&target.table),
            );
            let lookup = |e: rusqlite::Error| {
                RecoveryError::from(SqliteError::Schema(format!(
                    "{}.{}: {}",
                    target.table, target.column, e
                )))
            };

            let mut stmt = conn.prepare(&sql).map_err(lookup)?;
            let mut rows = stmt.query([]).map_err(lookup)?;
            let mut values = Vec::new();
            while let Some(row) = rows.next().map_err(lookup)? {
                if let ValueRef::Text(bytes) = row.get_ref(0).map_err(lookup)? {
                    values.push(String::from_utf8_lossy(bytes).into_owned());
                }
            }

            Ok(CandidateColumn {
                table: target.table.clone(),
                column: target.column.clone(),
                values,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_candidates_skips_null_and_non_text() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE category (category_id INTEGER, name);
             INSERT INTO category VALUES (1, 'Action'), (2, 'Action'), (3, NULL), (4, 42);",
        )
        .unwrap();

        let candidates =
            load_candidates(&conn, &[ValueColumn::new("category", "name")]).unwrap();
        assert_eq!(candidates[0].values, vec!["Action".to_string()]);
    }

    #[test]
    fn test_load_candidates_unknown_column_is_lookup_error() {
        let conn = Connection::open_in_memory().unwrap();
        let err = load_candidates(&conn, &[ValueColumn::new("film", "title")]).unwrap_err();
        assert!(matches!(err, RecoveryError::Lookup(_)));
    }
}
