//! Error types for smartstudy.

use thiserror::Error;

/// Errors produced by the library.
#[derive(Debug, Error)]
pub enum StudyError {
    /// A SQLite operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Configuration could not be read, parsed or written.
    #[error("config error: {0}")]
    Config(String),

    /// User input was rejected before reaching the engines.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The requested record does not exist (or belongs to another user).
    #[error("{0} not found")]
    NotFound(String),

    /// A uniqueness constraint would be violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// No user was selected for a command that needs one.
    #[error("no active user: pass --user, set SMARTSTUDY_USER, or set general.default_user")]
    NoActiveUser,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for StudyError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}
