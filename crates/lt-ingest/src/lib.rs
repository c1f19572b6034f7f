//! logtriage ingestion: validates uploaded log files, runs them through the
//! parsing pipeline, and persists the records in bounded batches.
//!
//! Re-exports all modules so the binary and `lt-e2e-tests` can reach
//! `Ingestor`, the sinks, and the mock source.

pub mod config;
pub mod error;
pub mod ingest;
pub mod mock;
pub mod sink;
pub mod source;
pub mod validate;

pub use config::{IngestConfig, OutputConfig};
pub use error::{IngestError, IngestResult, ValidationError};
pub use ingest::{IngestSummary, Ingestor};
pub use mock::MockLogSource;
pub use sink::{JsonLinesSink, MemorySink, RecordBatch, RecordSink};
pub use source::{FileLogSource, LogSource};
pub use validate::FileValidator;
