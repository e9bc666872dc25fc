//! SQLite storage backend implementation.
//!
//! This module implements the repository traits using `rusqlite`, with all
//! calls dispatched through the [`exec`](crate::exec) worker pool. Each
//! operation runs inside one transaction on one worker-owned connection.

mod conversions;
mod error;
mod open;
mod repository;
mod schema;
mod tx;

pub use open::open_connection;
pub use repository::SqliteCatalog;
