//! Ingestion error types.

use thiserror::Error;

use lt_parser::ParseError;

/// Upload policy violations detected before parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("file too large: {size} bytes (maximum {max})")]
    TooLarge { size: u64, max: u64 },

    #[error("invalid file type '{0}': allowed extensions are {1}")]
    Extension(String, String),

    #[error("file content is not valid text")]
    NotText,
}

/// Errors that can occur while ingesting a log file.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("source not found: {0}")]
    NotFound(String),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("sink error: {0}")]
    Sink(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Convenience alias for ingestion results.
pub type IngestResult<T> = Result<T, IngestError>;
