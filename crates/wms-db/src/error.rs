//! Database error types for wms-db.

use thiserror::Error;
use wms_core::errors::CoreError;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned data that could not be mapped.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// The rows exist but are in a state that forbids the operation.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The user lacks the module permission.
    #[error("Permission denied: code {code} is not granted to this user")]
    PermissionDenied { code: i64 },

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Domain error (not found, validation, bad transition).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// Shorthand for a `CoreError::NotFound` wrapped as a database error.
    pub fn not_found(entity_type: &str, id: impl ToString) -> Self {
        Self::Core(CoreError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        })
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Core(CoreError::Validation(message.into()))
    }
}
