//! Error types for luno-core

use thiserror::Error;

use crate::validation::FieldErrors;

/// Result type alias using luno-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in luno-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// libSQL error
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique constraint violated (duplicate slug)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Form validation failed on one or more fields
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Map a libSQL error raised by a unique index into `Conflict`.
    pub(crate) fn from_unique_violation(error: libsql::Error, what: impl Into<String>) -> Self {
        if error
            .to_string()
            .to_ascii_lowercase()
            .contains("unique constraint failed")
        {
            Self::Conflict(what.into())
        } else {
            Self::LibSql(error)
        }
    }
}
