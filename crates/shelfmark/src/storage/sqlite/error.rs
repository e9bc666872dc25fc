//! SQLite error mapping.
//!
//! Maps `rusqlite::Error` and `ExecError` to `RepositoryError` from
//! `shelfmark_core::storage`. Constraint codes become the semantic
//! `Constraint` variant; everything else degrades to `QueryFailed`.

use thiserror::Error;

use shelfmark_core::storage::RepositoryError;

use crate::exec::ExecError;

/// Error type for work running inside a worker transaction.
///
/// Lets store logic use `?` on rusqlite calls while still being able to
/// fail with an already-shaped repository error (absent relation ids,
/// required rows that vanished).
#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("{0}")]
    Repo(RepositoryError),
}

impl StoreError {
    pub(crate) fn into_repository_error(self, entity_type: &'static str) -> RepositoryError {
        match self {
            StoreError::Sqlite(err) => map_rusqlite_error(&err, entity_type),
            StoreError::Repo(err) => err,
        }
    }
}

impl From<RepositoryError> for StoreError {
    fn from(err: RepositoryError) -> Self {
        StoreError::Repo(err)
    }
}

/// Maps a rusqlite error to a RepositoryError.
///
/// # Error Mapping
///
/// - `SQLITE_CONSTRAINT_UNIQUE` / `_PRIMARYKEY` → `Constraint`
/// - `SQLITE_CONSTRAINT_FOREIGNKEY` → `Constraint`
/// - Open failures → `ConnectionFailed`
/// - All other errors → `QueryFailed`
pub(crate) fn map_rusqlite_error(
    err: &rusqlite::Error,
    entity_type: &'static str,
) -> RepositoryError {
    match err {
        // Duplicate key (UNIQUE or PRIMARY KEY)
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            RepositoryError::Constraint(format!(
                "{entity_type} violates a uniqueness constraint: {err}"
            ))
        }

        // Invalid reference
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
        {
            RepositoryError::Constraint(format!(
                "{entity_type} references a row that does not exist"
            ))
        }

        // Connection-related errors
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            RepositoryError::ConnectionFailed(format!("Cannot open database: {err}"))
        }

        // All other errors
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps an execution-context failure to a RepositoryError.
pub(crate) fn map_exec_error(err: ExecError) -> RepositoryError {
    match err {
        ExecError::ChannelClosed => {
            RepositoryError::ConnectionFailed("database worker channel closed".to_string())
        }
        ExecError::Timeout(ms) => RepositoryError::Timeout(ms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::ffi;

    fn sqlite_failure(code: rusqlite::ErrorCode, extended_code: i32) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(
            ffi::Error {
                code,
                extended_code,
            },
            None,
        )
    }

    #[test]
    fn test_unique_constraint_maps_to_constraint() {
        let err = sqlite_failure(
            rusqlite::ErrorCode::ConstraintViolation,
            ffi::SQLITE_CONSTRAINT_UNIQUE,
        );

        let result = map_rusqlite_error(&err, "Author");

        assert!(matches!(result, RepositoryError::Constraint(_)));
        assert!(result.to_string().contains("Author"));
    }

    #[test]
    fn test_foreign_key_maps_to_constraint() {
        let err = sqlite_failure(
            rusqlite::ErrorCode::ConstraintViolation,
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
        );

        let result = map_rusqlite_error(&err, "Publication");

        assert!(matches!(result, RepositoryError::Constraint(_)));
    }

    #[test]
    fn test_cannot_open_maps_to_connection_failed() {
        let err = sqlite_failure(rusqlite::ErrorCode::CannotOpen, ffi::SQLITE_CANTOPEN);

        let result = map_rusqlite_error(&err, "Review");

        assert!(matches!(result, RepositoryError::ConnectionFailed(_)));
    }

    #[test]
    fn test_other_errors_map_to_query_failed() {
        let result = map_rusqlite_error(&rusqlite::Error::QueryReturnedNoRows, "Review");

        assert!(matches!(result, RepositoryError::QueryFailed(_)));
    }

    #[test]
    fn test_store_error_preserves_repo_variant() {
        let err = StoreError::from(RepositoryError::Constraint(
            "author 9 does not exist".to_string(),
        ));

        let result = err.into_repository_error("Publication");

        assert_eq!(
            result,
            RepositoryError::Constraint("author 9 does not exist".to_string())
        );
    }

    #[test]
    fn test_exec_timeout_maps_to_timeout() {
        assert_eq!(
            map_exec_error(ExecError::Timeout(5_000)),
            RepositoryError::Timeout(5_000)
        );
    }

    #[test]
    fn test_exec_channel_closed_maps_to_connection_failed() {
        assert!(matches!(
            map_exec_error(ExecError::ChannelClosed),
            RepositoryError::ConnectionFailed(_)
        ));
    }
}
