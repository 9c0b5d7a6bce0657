//! Error types for apptbook.

use thiserror::Error;

/// Errors that can occur while configuring or persisting apptbook state.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for apptbook operations.
pub type AppResult<T> = Result<T, AppError>;

/// Reasons a candidate appointment is rejected. The mutation is never attempted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name too short")]
    NameTooShort,

    #[error("invalid date/time")]
    InvalidDateTime,

    #[error("must be in the future")]
    NotInFuture,

    #[error("duplicate appointment")]
    Duplicate,
}

/// Errors returned by the store facade when submitting a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("appointment not found: {0}")]
    NotFound(String),
}
