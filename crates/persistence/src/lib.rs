// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Snapshot persistence for the Tatacoa package engine.
//!
//! The engine's durable unit is the [`PackageState`] snapshot: the
//! aggregate under composition plus the package-level headcount and
//! date range. UI-only session fields are deliberately excluded.
//!
//! ## Backend Support
//!
//! - **In-memory**: used for unit tests and ephemeral sessions;
//!   deterministic and requires no infrastructure.
//! - **`SQLite`**: the durable default; a single key-value table
//!   holding the JSON-serialized snapshot body. `SQLite` support is
//!   always available through the bundled library and requires no
//!   external infrastructure.
//!
//! Backend dispatch happens exclusively inside [`SnapshotStore`]; no
//! caller ever branches on the backend.
//!
//! ## Cold starts
//!
//! Loading a key that was never saved is not an error: it returns
//! `Ok(None)` and the caller begins from the initial empty state.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use rusqlite::{Connection, OptionalExtension, params};
use std::collections::HashMap;
use std::path::Path;
use tatacoa_package::PackageState;

mod error;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// The storage backing a [`SnapshotStore`].
#[derive(Debug)]
enum StoreBackend {
    /// Snapshots held in process memory, keyed by snapshot key.
    InMemory(HashMap<String, String>),
    /// Snapshots held in a `SQLite` key-value table.
    Sqlite(Connection),
}

/// Saves and restores package snapshots behind an opaque key-value
/// contract.
///
/// The store serializes each snapshot to JSON and writes it under the
/// caller's key (typically the session id). Restoring a snapshot and
/// applying further operations preserves every aggregate invariant:
/// the serialized form is lossless.
#[derive(Debug)]
pub struct SnapshotStore {
    backend: StoreBackend,
}

impl SnapshotStore {
    /// Creates a store backed by process memory.
    ///
    /// Contents are lost when the store is dropped.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            backend: StoreBackend::InMemory(HashMap::new()),
        }
    }

    /// Opens a store backed by a `SQLite` database file, creating the
    /// file and schema as needed.
    ///
    /// # Arguments
    ///
    /// * `path` - The database file path
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema
    /// cannot be initialized.
    pub fn open(path: &Path) -> Result<Self, PersistenceError> {
        let connection: Connection = Connection::open(path)
            .map_err(|err| PersistenceError::DatabaseConnectionFailed(err.to_string()))?;
        Self::initialize_schema(&connection)?;
        tracing::debug!(path = %path.display(), "opened snapshot store");
        Ok(Self {
            backend: StoreBackend::Sqlite(connection),
        })
    }

    /// Opens a store backed by an in-memory `SQLite` database.
    ///
    /// Exercises the real `SQLite` code path without touching disk;
    /// contents are lost when the store is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema
    /// cannot be initialized.
    pub fn open_sqlite_in_memory() -> Result<Self, PersistenceError> {
        let connection: Connection = Connection::open_in_memory()
            .map_err(|err| PersistenceError::DatabaseConnectionFailed(err.to_string()))?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            backend: StoreBackend::Sqlite(connection),
        })
    }

    /// Saves a snapshot under a key, replacing any previous snapshot.
    ///
    /// # Arguments
    ///
    /// * `key` - The snapshot key (typically the session id)
    /// * `snapshot` - The state to persist
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database write fails.
    pub fn save(&mut self, key: &str, snapshot: &PackageState) -> Result<(), PersistenceError> {
        let body: String = serde_json::to_string(snapshot)?;
        match &mut self.backend {
            StoreBackend::InMemory(entries) => {
                entries.insert(key.to_owned(), body);
            }
            StoreBackend::Sqlite(connection) => {
                connection.execute(
                    "INSERT INTO package_snapshots (snapshot_key, body) VALUES (?1, ?2)
                     ON CONFLICT(snapshot_key) DO UPDATE
                     SET body = excluded.body, saved_at = datetime('now')",
                    params![key, body],
                )?;
            }
        }
        tracing::debug!(key, "saved package snapshot");
        Ok(())
    }

    /// Loads the snapshot saved under a key.
    ///
    /// A key that was never saved yields `Ok(None)` (cold start).
    ///
    /// # Arguments
    ///
    /// * `key` - The snapshot key
    ///
    /// # Errors
    ///
    /// Returns an error if the database read or deserialization fails.
    pub fn load(&self, key: &str) -> Result<Option<PackageState>, PersistenceError> {
        let body: Option<String> = match &self.backend {
            StoreBackend::InMemory(entries) => entries.get(key).cloned(),
            StoreBackend::Sqlite(connection) => connection
                .query_row(
                    "SELECT body FROM package_snapshots WHERE snapshot_key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()?,
        };

        let Some(body) = body else {
            tracing::debug!(key, "no package snapshot found");
            return Ok(None);
        };

        let snapshot: PackageState = serde_json::from_str(&body)?;
        tracing::debug!(key, "loaded package snapshot");
        Ok(Some(snapshot))
    }

    /// Deletes the snapshot saved under a key, if any.
    ///
    /// # Arguments
    ///
    /// * `key` - The snapshot key
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub fn delete(&mut self, key: &str) -> Result<(), PersistenceError> {
        match &mut self.backend {
            StoreBackend::InMemory(entries) => {
                entries.remove(key);
            }
            StoreBackend::Sqlite(connection) => {
                connection.execute(
                    "DELETE FROM package_snapshots WHERE snapshot_key = ?1",
                    params![key],
                )?;
            }
        }
        tracing::debug!(key, "deleted package snapshot");
        Ok(())
    }

    /// Creates the snapshot table if it does not exist.
    fn initialize_schema(connection: &Connection) -> Result<(), PersistenceError> {
        connection
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS package_snapshots (
                    snapshot_key TEXT PRIMARY KEY NOT NULL,
                    body TEXT NOT NULL,
                    saved_at TEXT NOT NULL DEFAULT (datetime('now'))
                )",
            )
            .map_err(|err| PersistenceError::InitializationError(err.to_string()))
    }
}
