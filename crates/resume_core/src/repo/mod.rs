//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the local storage contract the document store persists through.
//! - Isolate SQLite query details from document orchestration.

pub mod storage_repo;
