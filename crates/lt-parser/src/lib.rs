//! Log parsing pipeline for logtriage.
//!
//! Turns loosely structured text logs into normalized [`LogRecord`]s:
//! one format is detected per file (Symfony/Monolog, Apache/Nginx access
//! logs, or a generic catch-all), each non-blank line becomes one record
//! with a normalized timestamp and severity, and records stream lazily so
//! callers can persist them in bounded batches.

pub mod clock;
pub mod error;
pub mod parsers;
pub mod pipeline;
pub mod registry;
pub mod severity;
pub mod stats;
pub mod timestamp;
pub mod types;

// Re-export key types for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ParseError, ParseResult};
pub use parsers::{
    AccessLogParser, Batches, GenericLineParser, LineParser, MonologLineParser, ParseStats,
    Records,
};
pub use pipeline::{ParseOutput, ParsePipeline};
pub use registry::FormatRegistry;
pub use stats::{LogStats, StatsAccumulator};
pub use types::{LogRecord, LogTimestamp, Severity};
