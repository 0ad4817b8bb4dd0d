//! Store configuration.
//!
//! # Responsibility
//! - Hold the fixed identifiers shared by persistence and export.
//! - Resolve where the local store lives on disk.
//!
//! # Invariants
//! - The persisted value and the export file use the same serialization, so
//!   only names differ between them.

use crate::db::{open_db, open_db_in_memory, DbResult};
use rusqlite::Connection;
use std::path::PathBuf;

/// Local storage key holding the serialized document.
pub const STORAGE_KEY: &str = "resume-data";
/// File name used for exported documents.
pub const EXPORT_FILE_NAME: &str = "resume-data.json";
/// SQLite file name used when no explicit path is configured.
pub const DEFAULT_DB_FILE_NAME: &str = "resume_builder.sqlite3";

/// Where and under which key the document is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Key of the single local storage row.
    pub storage_key: String,
    /// Database file. `None` resolves to the temp dir, `in_memory` skips disk.
    pub db_path: Option<PathBuf>,
    /// Keep the store in memory for the lifetime of the connection.
    pub in_memory: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            db_path: None,
            in_memory: false,
        }
    }
}

impl StoreConfig {
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = Some(path.into());
        self
    }

    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        self
    }

    /// Resolves the database file path.
    pub fn resolve_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME))
    }

    /// Opens the configured store with migrations applied.
    pub fn open_connection(&self) -> DbResult<Connection> {
        if self.in_memory {
            return open_db_in_memory();
        }
        open_db(self.resolve_db_path())
    }
}
