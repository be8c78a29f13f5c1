//! Schema introspection
//!
//! Reads table definitions once and renders them as the plain-text
//! description embedded in generation and repair prompts:
//!
//! ```text
//! Table: film
//!   - film_id (INTEGER) PRIMARY KEY
//!   - title (TEXT) NOT NULL
//!   - language_id (INTEGER) NOT NULL
//!   Foreign keys:
//!   - language_id -> language(language_id)
//! ```

use crate::connection::SqliteConnector;
use crate::error::{SqliteError, SqliteResult};
use quarry_core::SchemaProvider;
use rusqlite::Connection;
use std::fmt::Write;
use tracing::info;

/// One column of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    /// Declared type, empty when the column has none
    pub data_type: String,
    pub not_null: bool,
    pub primary_key: bool,
}

/// One foreign key edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub column: String,
    pub referenced_table: String,
    pub referenced_column: String,
}

/// One user table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
    pub foreign_keys: Vec<ForeignKey>,
}

/// Schema description loaded from a SQLite database
#[derive(Debug, Clone)]
pub struct SqliteSchemaProvider {
    tables: Vec<TableInfo>,
    description: String,
}

impl SqliteSchemaProvider {
    /// Introspect the database behind `connector`
    pub async fn load(connector: &SqliteConnector) -> SqliteResult<Self> {
        let tables = connector
            .with_connection(std::convert::identity, |conn| introspect(conn))
            .await?;
        info!(tables = tables.len(), "Loaded database schema");
        Ok(Self::from_tables(tables))
    }

    /// Build from already-known tables
    pub fn from_tables(tables: Vec<TableInfo>) -> Self {
        let description = render(&tables);
        Self {
            tables,
            description,
        }
    }

    pub fn tables(&self) -> &[TableInfo] {
        &self.tables
    }
}

impl SchemaProvider for SqliteSchemaProvider {
    fn schema_description(&self) -> String {
        self.description.clone()
    }
}

fn schema_error(e: rusqlite::Error) -> SqliteError {
    SqliteError::Schema(e.to_string())
}

/// Read every user table with its columns and foreign keys
pub fn introspect(conn: &Connection) -> SqliteResult<Vec<TableInfo>> {
    let mut stmt = conn
        .prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name",
        )
        .map_err(schema_error)?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(schema_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(schema_error)?;

    names
        .into_iter()
        .map(|name| {
            Ok(TableInfo {
                columns: table_columns(conn, &name)?,
                foreign_keys: table_foreign_keys(conn, &name)?,
                name,
            })
        })
        .collect()
}

fn table_columns(conn: &Connection, table: &str) -> SqliteResult<Vec<ColumnInfo>> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({})", quote_identifier(table)))
        .map_err(schema_error)?;
    let columns = stmt
        .query_map([], |row| {
            Ok(ColumnInfo {
                name: row.get("name")?,
                data_type: row.get("type")?,
                not_null: row.get::<_, i64>("notnull")? != 0,
                primary_key: row.get::<_, i64>("pk")? != 0,
            })
        })
        .map_err(schema_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(schema_error)?;
    Ok(columns)
}

fn table_foreign_keys(conn: &Connection, table: &str) -> SqliteResult<Vec<ForeignKey>> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA foreign_key_list({})", quote_identifier(table)))
        .map_err(schema_error)?;
    let keys = stmt
        .query_map([], |row| {
            Ok(ForeignKey {
                column: row.get("from")?,
                referenced_table: row.get("table")?,
                // NULL when the key targets the parent's primary key implicitly
                referenced_column: row.get::<_, Option<String>>("to")?.unwrap_or_default(),
            })
        })
        .map_err(schema_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(schema_error)?;
    Ok(keys)
}

/// Quote an identifier for interpolation into SQL
pub(crate) fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn render(tables: &[TableInfo]) -> String {
    let mut out = String::new();
    for table in tables {
        let _ = writeln!(out, "Table: {}", table.name);
        for column in &table.columns {
            let data_type = if column.data_type.is_empty() {
                "ANY"
            } else {
                column.data_type.as_str()
            };
            let _ = write!(out, "  - {} ({})", column.name, data_type);
            if column.primary_key {
                out.push_str(" PRIMARY KEY");
            }
            if column.not_null && !column.primary_key {
                out.push_str(" NOT NULL");
            }
            out.push('\n');
        }
        if !table.foreign_keys.is_empty() {
            out.push_str("  Foreign keys:\n");
            for key in &table.foreign_keys {
                let _ = writeln!(
                    out,
                    "  - {} -> {}({})",
                    key.column, key.referenced_table, key.referenced_column
                );
            }
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}
