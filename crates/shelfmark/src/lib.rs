//! Shelfmark - catalog of publications and reviews.
//!
//! This crate implements the repository traits from `shelfmark_core` on top
//! of SQLite. Persistence calls are blocking, so they run on a dedicated
//! pool of worker threads ([`exec::Pool`]) sized to the number of database
//! connections; callers get a future back and are never stalled by I/O.
//!
//! # Architecture
//!
//! - **Contracts** (`shelfmark_core`): entity types, repository traits,
//!   error taxonomy
//! - **Execution context** ([`exec`]): bounded worker-thread pool, one
//!   connection per worker
//! - **Storage** ([`storage::sqlite`]): transactional SQLite repository
//!
//! # Example
//!
//! ```ignore
//! use shelfmark::{Config, SqliteCatalog};
//! use shelfmark_core::catalog::NewReview;
//! use shelfmark_core::storage::ReviewRepository;
//!
//! let config = Config::from_env();
//! let catalog = SqliteCatalog::open(&config.db_path, config.pool_config())?;
//!
//! let review = catalog.add(NewReview {
//!     title: "On parsing".into(),
//!     review_author: "ab".into(),
//!     publication: "CACM".into(),
//!     body: "Thorough.".into(),
//! }).await?;
//! ```

mod config;
pub mod exec;
pub mod models;
pub mod storage;

pub use config::Config;
pub use storage::sqlite::SqliteCatalog;

// Re-export core types for convenience
pub use shelfmark_core::catalog;
pub use shelfmark_core::storage::{RepositoryError, Result};
