//! Resume domain model.
//!
//! # Responsibility
//! - Define the canonical document structure rendered by editor and preview.
//! - Define typed addresses (lists, items, scalar fields) into a document.
//!
//! # Invariants
//! - Exactly one document root exists per store; entries have no identity
//!   beyond their current position.

pub mod address;
pub mod resume;
pub mod theme;
