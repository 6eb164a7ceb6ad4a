//! SQLite medium: a single `kv_items` table.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

use consent_core::errors::StorageError;
use consent_core::traits::IStorageMedium;

use crate::to_storage_err;

const SCHEMA: &str = "
    PRAGMA journal_mode = WAL;
    PRAGMA synchronous = NORMAL;
    PRAGMA busy_timeout = 5000;
    CREATE TABLE IF NOT EXISTS kv_items (
        key        TEXT PRIMARY KEY,
        value      TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
";

fn sqlite_err(e: rusqlite::Error) -> StorageError {
    StorageError::SqliteError {
        message: e.to_string(),
    }
}

/// Key/value medium on one SQLite connection. Writes are serialized by the
/// connection mutex.
#[derive(Debug)]
pub struct SqliteMedium {
    conn: Mutex<Connection>,
}

impl SqliteMedium {
    /// Open (creating if needed) a database file.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(sqlite_err)?;
        Self::initialize(conn)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(sqlite_err)?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(SCHEMA).map_err(sqlite_err)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn
            .lock()
            .map_err(|e| to_storage_err(format!("sqlite connection lock poisoned: {e}")))
    }

    /// Number of rows in the table.
    pub fn count(&self) -> Result<usize, StorageError> {
        let n: i64 = self
            .lock()?
            .query_row("SELECT COUNT(*) FROM kv_items", [], |row| row.get(0))
            .map_err(sqlite_err)?;
        Ok(n as usize)
    }
}

impl IStorageMedium for SqliteMedium {
    fn read(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let raw: Option<String> = self
            .lock()?
            .query_row(
                "SELECT value FROM kv_items WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(sqlite_err)?;

        raw.map(|s| {
            serde_json::from_str(&s).map_err(|e| StorageError::Corrupted {
                details: format!("value for '{key}': {e}"),
            })
        })
        .transpose()
    }

    fn write(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.lock()?
            .execute(
                "INSERT INTO kv_items (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value.to_string(), Utc::now().to_rfc3339()],
            )
            .map_err(sqlite_err)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.lock()?
            .execute("DELETE FROM kv_items WHERE key = ?1", params![key])
            .map_err(sqlite_err)?;
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT key FROM kv_items WHERE substr(key, 1, length(?1)) = ?1 ORDER BY key",
            )
            .map_err(sqlite_err)?;
        let rows = stmt
            .query_map(params![prefix], |row| row.get::<_, String>(0))
            .map_err(sqlite_err)?;
        let keys = rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)?;
        Ok(keys)
    }
}
