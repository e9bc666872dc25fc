//! Storage backend implementations.
//!
//! This module provides the concrete implementation of the repository
//! traits defined in `shelfmark_core::storage`. SQLite is currently the
//! only backend.

pub mod sqlite;

pub use sqlite::SqliteCatalog;
