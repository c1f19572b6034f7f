//! Parser configuration error types.
//!
//! Nothing here is raised per line: unparseable timestamps, malformed JSON
//! fragments and non-conforming lines all degrade into records instead.

use thiserror::Error;

/// Errors raised while assembling the parsing pipeline.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no parser available: {0}")]
    NoParserAvailable(String),

    #[error("invalid parser registration: {0}")]
    InvalidParser(String),
}

/// Convenience alias for parser results.
pub type ParseResult<T> = Result<T, ParseError>;
