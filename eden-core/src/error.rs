//! Error types for the Eden Festival tools.

use thiserror::Error;

/// Errors that can occur in schedule and tag operations.
#[derive(Error, Debug)]
pub enum EdenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Could not apply JSON: {0}")]
    InvalidJson(String),

    #[error("{0}")]
    Validation(String),

    #[error("A shared tag with that name already exists.")]
    TagConflict(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for schedule and tag operations.
pub type EdenResult<T> = Result<T, EdenError>;
