//! Core document logic for the resume builder.
//! This crate is the single source of truth for resume document invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod transfer;

pub use config::{StoreConfig, DEFAULT_DB_FILE_NAME, EXPORT_FILE_NAME, STORAGE_KEY};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::address::{
    BasicsField, EducationField, ExperienceField, FieldPath, ListItem, ListName, ProjectField,
    NEW_BULLET_TEXT, NEW_SKILL_TEXT,
};
pub use model::resume::{Basics, EducationEntry, ExperienceEntry, ProjectEntry, ResumeDocument};
pub use model::theme::{Theme, ThemePalette};
pub use repo::storage_repo::{RepoError, RepoResult, SqliteStorageRepository, StorageRepository};
pub use service::document_store::{
    load_document, DocumentEdit, DocumentStore, StoreError, StoreResult,
};
pub use transfer::json::{
    export_document, export_string, import_document, read_import_file, write_export_file,
    TransferError, TransferResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
