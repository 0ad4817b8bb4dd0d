//! Import/export boundary for resume documents.
//!
//! # Responsibility
//! - Serialize a document into the interchange format used for export files
//!   and for the persisted local storage value.
//! - Parse uploaded bytes back into a document.

pub mod json;
