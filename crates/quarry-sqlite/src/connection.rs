//! Scoped SQLite connections
//!
//! Nothing is pooled: every unit of work opens a connection, configures it,
//! and drops it before returning, on success and on failure alike.

use crate::error::{SqliteError, SqliteResult};
use quarry_config::DatabaseConfig;
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Opens configured connections to one database file
#[derive(Debug, Clone)]
pub struct SqliteConnector {
    path: PathBuf,
    read_only: bool,
    busy_timeout_ms: u32,
}

impl SqliteConnector {
    /// Read-only connector for `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let defaults = DatabaseConfig::default();
        Self {
            path: path.into(),
            read_only: defaults.read_only,
            busy_timeout_ms: defaults.busy_timeout_ms,
        }
    }

    /// Connector from the `[database]` section
    pub fn from_config(config: &DatabaseConfig) -> SqliteResult<Self> {
        let path = config
            .path
            .clone()
            .ok_or_else(|| SqliteError::Connection("no database path configured".to_string()))?;

        Ok(Self {
            path,
            read_only: config.read_only,
            busy_timeout_ms: config.busy_timeout_ms,
        })
    }

    /// Database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether connections refuse writes
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Open and configure a fresh connection
    ///
    /// A missing file is an error, never silently created.
    pub fn open(&self) -> SqliteResult<Connection> {
        debug!(
            path = %self.path.display(),
            read_only = self.read_only,
            "Opening SQLite connection"
        );

        let flags = if self.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let conn = Connection::open_with_flags(&self.path, flags).map_err(|e| {
            SqliteError::Connection(format!("{}: {}", self.path.display(), e))
        })?;
        self.configure_pragmas(&conn)
            .map_err(|e| SqliteError::Connection(e.to_string()))?;
        Ok(conn)
    }

    fn configure_pragmas(&self, conn: &Connection) -> rusqlite::Result<()> {
        conn.execute_batch(&format!("PRAGMA busy_timeout = {};", self.busy_timeout_ms))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        if self.read_only {
            conn.execute_batch("PRAGMA query_only = ON;")?;
        }
        Ok(())
    }

    /// Run `f` against a fresh connection on a blocking thread
    ///
    /// `open_error` classifies failures to open the connection or to join
    /// the task; errors from `f` pass through. The connection is dropped
    /// before the task ends.
    pub async fn with_connection<F, T, E>(
        &self,
        open_error: fn(SqliteError) -> E,
        f: F,
    ) -> Result<T, E>
    where
        F: FnOnce(&Connection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        let connector = self.clone();
        tokio::task::spawn_blocking(move || {
            let conn = connector.open().map_err(open_error)?;
            f(&conn)
        })
        .await
        .map_err(|e| open_error(SqliteError::Task(e.to_string())))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_path_is_connection_error() {
        let err = SqliteConnector::from_config(&DatabaseConfig::default()).unwrap_err();
        assert!(matches!(err, SqliteError::Connection(_)));
    }

    #[test]
    fn test_missing_file_is_not_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");
        let connector = SqliteConnector::new(&path);

        assert!(matches!(connector.open(), Err(SqliteError::Connection(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_read_only_connection_rejects_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ro.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE t (x INTEGER);")
            .unwrap();

        let conn = SqliteConnector::new(&path).open().unwrap();
        assert!(conn.execute_batch("INSERT INTO t VALUES (1);").is_err());

        let writable = SqliteConnector::from_config(&DatabaseConfig::new(&path).writable())
            .unwrap()
            .open()
            .unwrap();
        writable.execute_batch("INSERT INTO t VALUES (1);").unwrap();
    }
}
