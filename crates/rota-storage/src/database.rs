// SPDX-FileCopyrightText: 2026 Rota Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All access is serialized through tokio-rusqlite's single background
//! thread: `Database` wraps one `tokio_rusqlite::Connection`, every query
//! module accepts `&Database` and calls through `connection().call()`, and
//! multi-record operations run their whole read-modify-write inside one
//! closure (usually one SQL transaction). This is what guarantees that an
//! interactive join and a scheduler-fired Close on the same queue never
//! interleave. Do NOT create additional Connection instances for writes.

use std::path::Path;

use rota_config::model::StorageConfig;
use rota_core::RotaError;
use tokio_rusqlite::Connection;
use tracing::debug;

use crate::migrations;

/// Handle to the WAL-mode SQLite database.
///
/// Cheap to clone; all clones share the single writer thread.
#[derive(Clone)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens the database described by the storage config section.
    pub async fn from_config(config: &StorageConfig) -> Result<Self, RotaError> {
        Self::open_inner(&config.database_path, config.wal_mode).await
    }

    /// Opens (creating if needed) the database at `path` in WAL mode,
    /// applies PRAGMAs, and runs all pending migrations.
    pub async fn open(path: &str) -> Result<Self, RotaError> {
        Self::open_inner(path, true).await
    }

    async fn open_inner(path: &str, wal_mode: bool) -> Result<Self, RotaError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| RotaError::Storage {
                    source: Box::new(e),
                })?;
            }
        }

        let conn = Connection::open(path)
            .await
            .map_err(|e| map_tr_err(tokio_rusqlite::Error::from(e)))?;

        conn.call(move |conn| {
            if wal_mode {
                conn.execute_batch("PRAGMA journal_mode = WAL;")?;
            }
            conn.execute_batch(
                "PRAGMA synchronous = NORMAL;
                 PRAGMA foreign_keys = ON;
                 PRAGMA busy_timeout = 5000;",
            )?;
            migrations::run_migrations_raw(conn)?;
            Ok(())
        })
        .await
        .map_err(map_tr_box_err)?;

        debug!(path, "database opened");
        Ok(Self { conn })
    }

    /// Returns the shared connection handle.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoints the WAL ahead of process exit.
    pub async fn close(&self) -> Result<(), RotaError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

/// Map a tokio-rusqlite call error into the shared error type.
pub fn map_tr_err(err: tokio_rusqlite::Error) -> RotaError {
    RotaError::Storage {
        source: Box::new(err),
    }
}

/// Map a tokio-rusqlite call error whose closure returned a boxed error.
///
/// `tokio_rusqlite::Error<Box<dyn Error>>` does not itself implement
/// `std::error::Error` (a boxed trait object is not `Sized`), so the inner
/// error is unwrapped into the storage source rather than the wrapper.
pub fn map_tr_box_err(
    err: tokio_rusqlite::Error<Box<dyn std::error::Error + Send + Sync>>,
) -> RotaError {
    let source: Box<dyn std::error::Error + Send + Sync> = match err {
        tokio_rusqlite::Error::Error(inner) => inner,
        tokio_rusqlite::Error::Close((_, e)) => Box::new(e),
        other => Box::new(std::io::Error::other(other.to_string())),
    };
    RotaError::Storage { source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_database_file() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("open_test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        assert!(db_path.exists(), "database file should be created");
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn open_creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested/deeper/rota.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        assert!(db_path.exists());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn migrations_create_expected_tables() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("schema.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();

        let tables: Vec<String> = db
            .connection()
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
                )?;
                let rows = stmt.query_map([], |row| row.get(0))?;
                let mut names = Vec::new();
                for row in rows {
                    names.push(row?);
                }
                Ok::<_, rusqlite::Error>(names)
            })
            .await
            .unwrap();

        for expected in ["users", "queues", "attendants", "conversation_states"] {
            assert!(
                tables.iter().any(|t| t == expected),
                "missing table {expected}, got {tables:?}"
            );
        }
    }

    #[tokio::test]
    async fn reopen_is_idempotent() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("reopen.db");
        {
            let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
            db.close().await.unwrap();
        }
        // Second open must not re-run already-applied migrations.
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        db.close().await.unwrap();
    }
}
