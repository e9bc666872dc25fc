use thiserror::Error;

/// Errors that can occur during repository operations.
///
/// Every failure travels through the returned future; repositories never
/// log-and-swallow, and no variant triggers an automatic retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A lookup that requires exactly one row found none.
    ///
    /// Plain `get` calls report an absent row as `Ok(None)`; this variant
    /// is for callers that need a singular result.
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: &'static str, id: i64 },

    /// A uniqueness or foreign-key constraint was violated, including
    /// attaching a relation to an id that does not exist.
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// The store could not be reached: open failure, worker gone, pool
    /// shut down.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The operation was submitted but no result arrived within the
    /// configured deadline. The operation itself may still complete.
    #[error("Operation timed out after {0}ms")]
    Timeout(u64),

    #[error("Query failed: {0}")]
    QueryFailed(String),
}

impl RepositoryError {
    /// Shorthand for the NotFound variant.
    pub fn not_found(entity_type: &'static str, id: i64) -> Self {
        RepositoryError::NotFound { entity_type, id }
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
