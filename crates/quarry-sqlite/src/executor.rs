//! Query execution

use crate::connection::SqliteConnector;
use crate::error::SqliteError;
use async_trait::async_trait;
use quarry_core::{CellValue, DbError, DbResult, QueryExecutor, Row};
use rusqlite::types::ValueRef;
use rusqlite::Connection;
use tracing::debug;

/// Runs generated SQL against a SQLite file
#[derive(Debug, Clone)]
pub struct SqliteExecutor {
    connector: SqliteConnector,
}

impl SqliteExecutor {
    pub fn new(connector: SqliteConnector) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl QueryExecutor for SqliteExecutor {
    async fn execute(&self, sql: &str) -> DbResult<Vec<Row>> {
        let sql = sql.to_string();
        self.connector
            .with_connection(
                |e: SqliteError| DbError::Connection(e.to_string()),
                move |conn| fetch_all(conn, &sql),
            )
            .await
    }
}

/// Prepare and step one statement, reading every row
fn fetch_all(conn: &Connection, sql: &str) -> DbResult<Vec<Row>> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| DbError::Syntax(e.to_string()))?;
    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut rows = stmt
        .query([])
        .map_err(|e| DbError::Execution(e.to_string()))?;

    let mut results = Vec::new();
    while let Some(row) = rows.next().map_err(|e| DbError::Execution(e.to_string()))? {
        let mut out = Row::new();
        for (index, column) in columns.iter().enumerate() {
            let value = row
                .get_ref(index)
                .map_err(|e| DbError::Execution(e.to_string()))?;
            out.push(column.clone(), cell_value(value));
        }
        results.push(out);
    }

    debug!(rows = results.len(), "Fetched rows");
    Ok(results)
}

fn cell_value(value: ValueRef<'_>) -> CellValue {
    match value {
        ValueRef::Null => CellValue::Null,
        ValueRef::Integer(i) => CellValue::Integer(i),
        ValueRef::Real(f) => CellValue::Float(f),
        ValueRef::Text(bytes) => CellValue::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => CellValue::Bytes(bytes.to_vec()),
    }
}
