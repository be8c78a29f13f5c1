//! SQLite collaborators for the Quarry workflow
//!
//! - [`SqliteExecutor`]: runs generated SQL, one connection per call
//! - [`SqliteSchemaProvider`]: renders the database schema for prompts
//! - [`ValuePatternRecoverer`]: rewrites string literals that match no
//!   stored value
//!
//! rusqlite is synchronous, so every database touch happens inside
//! `tokio::task::spawn_blocking`.

pub mod connection;
pub mod error;
pub mod executor;
pub mod recovery;
pub mod schema;

pub use connection::SqliteConnector;
pub use error::{SqliteError, SqliteResult};
pub use executor::SqliteExecutor;
pub use recovery::ValuePatternRecoverer;
pub use schema::{ColumnInfo, ForeignKey, SqliteSchemaProvider, TableInfo};
