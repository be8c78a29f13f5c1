//! Database executor abstraction

use crate::value::Row;
use async_trait::async_trait;
use thiserror::Error;

/// Execution faults, split by where the query failed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DbError {
    /// Could not open or configure a connection
    #[error("connection failed: {0}")]
    Connection(String),

    /// Query was rejected while being prepared (syntax, unknown table/column)
    #[error("invalid SQL: {0}")]
    Syntax(String),

    /// Query failed while running or reading rows
    #[error("execution failed: {0}")]
    Execution(String),
}

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;

/// Runs one SQL statement and returns all rows
///
/// Implementations acquire a connection per call and release it before
/// returning, on success and on failure alike.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Execute `sql` and fetch every row
    async fn execute(&self, sql: &str) -> DbResult<Vec<Row>>;
}
