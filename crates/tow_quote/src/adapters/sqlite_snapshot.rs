// Rust guideline compliant 2026-08-05

//! SQLite adapter for the `SnapshotStore` port (demo).
//!
//! Persists the flat form snapshot as key/value rows via `sqlx`, giving the
//! calculator the "last inputs survive a restart" behavior without any
//! persistence logic in the core crates.
//!
//! # Dependency note
//!
//! `sqlx` is a hard dependency (no feature flag). This is intentional for a
//! proof-of-concept binary where build-complexity trade-offs favour
//! simplicity over optional compilation.
//!
//! # Replace semantics
//!
//! `save` rewrites the whole snapshot inside one transaction, so a reader
//! never observes a half-written form.

use std::collections::BTreeMap;

use domain::{SnapshotError, SnapshotStore};
use sqlx::Row as _;

/// `SnapshotStore` adapter backed by a SQLite database file via `sqlx`.
///
/// Connects to (or creates) a SQLite file and ensures the `form_snapshot`
/// table exists.
#[derive(Debug, Clone)]
pub struct SqliteSnapshot {
    pool: sqlx::SqlitePool,
}

impl SqliteSnapshot {
    /// Open or create a SQLite database and initialize the schema.
    ///
    /// Passes `create_if_missing(true)` so the database file is created on
    /// first run without manual setup. The `form_snapshot` table is created
    /// via `CREATE TABLE IF NOT EXISTS`, making repeated calls safe.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` when the connection or schema creation fails.
    pub async fn new(db_url: &str) -> Result<Self, sqlx::Error> {
        // create_if_missing: sqlx 0.8 defaults to false for file databases;
        // enable explicitly so the demo works out of the box on first run.
        let opts = db_url
            .parse::<sqlx::sqlite::SqliteConnectOptions>()?
            .create_if_missing(true);
        let pool = sqlx::SqlitePool::connect_with(opts).await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS form_snapshot (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await?;
        Ok(Self { pool })
    }
}

impl SnapshotStore for SqliteSnapshot {
    /// Replace the stored snapshot with `snapshot` in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Unavailable` on any `sqlx` error. The
    /// underlying error is logged at `error` level before mapping.
    async fn save(&self, snapshot: &BTreeMap<String, String>) -> Result<(), SnapshotError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("sqlite_snapshot.begin: {e}");
            SnapshotError::Unavailable
        })?;
        sqlx::query("DELETE FROM form_snapshot")
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("sqlite_snapshot.delete: {e}");
                SnapshotError::Unavailable
            })?;
        for (key, value) in snapshot {
            sqlx::query("INSERT INTO form_snapshot (key, value) VALUES (?, ?)")
                .bind(key)
                .bind(value)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    tracing::error!("sqlite_snapshot.insert: {e}");
                    SnapshotError::Unavailable
                })?;
        }
        tx.commit().await.map_err(|e| {
            tracing::error!("sqlite_snapshot.commit: {e}");
            SnapshotError::Unavailable
        })
    }

    /// Load every key/value row, or `None` when the table is empty.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Unavailable` on any `sqlx` error.
    async fn load(&self) -> Result<Option<BTreeMap<String, String>>, SnapshotError> {
        let rows = sqlx::query("SELECT key, value FROM form_snapshot")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("sqlite_snapshot.load: {e}");
                SnapshotError::Unavailable
            })?;
        if rows.is_empty() {
            return Ok(None);
        }
        let mut snapshot = BTreeMap::new();
        for row in rows {
            snapshot.insert(row.get::<String, _>("key"), row.get::<String, _>("value"));
        }
        Ok(Some(snapshot))
    }

    /// Delete every stored row.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Unavailable` on any `sqlx` error.
    async fn clear(&self) -> Result<(), SnapshotError> {
        sqlx::query("DELETE FROM form_snapshot")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("sqlite_snapshot.clear: {e}");
                SnapshotError::Unavailable
            })?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
