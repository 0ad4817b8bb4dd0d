//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model edits, persistence and transfer into use-case APIs.
//! - Keep presentation callers decoupled from storage details.

pub mod document_store;
