//! SQLite-backed key-value store.
//!
//! One `kv` table, one connection behind a mutex. All access goes through
//! that single writer, which is all the contract needs at this volume.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};
use tracing::warn;

use kurrent_core::errors::StoreError;
use kurrent_core::KvStore;

/// Durable key-value store backed by a single SQLite table.
pub struct SqliteKvStore {
    conn: Mutex<Connection>,
}

impl SqliteKvStore {
    /// Open (or create) a store at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(to_store_err)?;
        Self::init(conn)
    }

    /// Open an in-memory store (tests, throwaway sessions).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(to_store_err)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )
        .map_err(to_store_err)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, rusqlite::Error>,
    ) -> Result<T, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Backend {
            message: "connection lock poisoned".to_string(),
        })?;
        f(&conn).map_err(to_store_err)
    }
}

fn to_store_err(e: rusqlite::Error) -> StoreError {
    StoreError::Backend {
        message: e.to_string(),
    }
}

impl KvStore for SqliteKvStore {
    fn get(&self, key: &str) -> Option<String> {
        let result = self.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
        });
        match result {
            Ok(value) => value,
            Err(e) => {
                // Reads fail open.
                warn!(key, "kv read failed, treating as absent: {e}");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map(|_| ())
        })
        .map_err(|e| StoreError::WriteFailed {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM kv WHERE key = ?1", params![key])
                .map(|_| ())
        })
        .map_err(|e| StoreError::WriteFailed {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }
}
