//! Persistence side of ingestion: record batches and the sinks that take them.
//!
//! Batches are written one at a time in line order. A sink that fails part
//! way through a file leaves the earlier batches persisted; there is no
//! rollback across a file.

use async_trait::async_trait;
use serde::Serialize;
use std::path::Path;
use std::sync::Mutex;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use lt_parser::LogRecord;

use crate::error::{IngestError, IngestResult};

/// A bounded chunk of one file's records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordBatch {
    /// Provenance label shared by every record in the file.
    pub source: String,
    /// 0-based position of this batch within its file.
    pub index: usize,
    pub records: Vec<LogRecord>,
}

impl RecordBatch {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Receives record batches for storage.
#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn write_batch(&self, batch: &RecordBatch) -> IngestResult<()>;
}

// ── In-memory sink ────────────────────────────────────────────

/// Keeps every batch in memory, optionally failing after a number of writes.
pub struct MemorySink {
    batches: Mutex<Vec<RecordBatch>>,
    fail_after: Option<usize>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            batches: Mutex::new(Vec::new()),
            fail_after: None,
        }
    }

    /// Accept `n` batches, then reject every further write.
    pub fn failing_after(n: usize) -> Self {
        Self {
            batches: Mutex::new(Vec::new()),
            fail_after: Some(n),
        }
    }

    /// Get all accepted batches.
    pub fn batches(&self) -> Vec<RecordBatch> {
        self.batches.lock().unwrap().clone()
    }

    /// All accepted records, flattened in write order.
    pub fn records(&self) -> Vec<LogRecord> {
        self.batches
            .lock()
            .unwrap()
            .iter()
            .flat_map(|b| b.records.iter().cloned())
            .collect()
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn write_batch(&self, batch: &RecordBatch) -> IngestResult<()> {
        let mut batches = self.batches.lock().unwrap();
        if self.fail_after.is_some_and(|n| batches.len() >= n) {
            return Err(IngestError::Sink(format!(
                "refusing batch {} from {}",
                batch.index, batch.source
            )));
        }
        batches.push(batch.clone());
        Ok(())
    }
}

// ── JSON-lines sink ───────────────────────────────────────────

/// One output line: the record plus its provenance.
#[derive(Serialize)]
struct Row<'a> {
    source: &'a str,
    batch: usize,
    #[serde(flatten)]
    record: &'a LogRecord,
}

/// Writes one JSON object per record, flushing after each batch.
pub struct JsonLinesSink {
    writer: tokio::sync::Mutex<Box<dyn AsyncWrite + Send + Unpin>>,
}

impl JsonLinesSink {
    pub fn new(writer: impl AsyncWrite + Send + Unpin + 'static) -> Self {
        Self {
            writer: tokio::sync::Mutex::new(Box::new(writer)),
        }
    }

    /// Append to `path`, creating it if needed.
    pub async fn append_to(path: &Path) -> IngestResult<Self> {
        let file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(|e| IngestError::Io(format!("{}: {e}", path.display())))?;
        Ok(Self::new(file))
    }

    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

#[async_trait]
impl RecordSink for JsonLinesSink {
    async fn write_batch(&self, batch: &RecordBatch) -> IngestResult<()> {
        let mut buf = Vec::new();
        for record in &batch.records {
            let row = Row {
                source: &batch.source,
                batch: batch.index,
                record,
            };
            serde_json::to_writer(&mut buf, &row).map_err(|e| IngestError::Sink(e.to_string()))?;
            buf.push(b'\n');
        }

        let mut writer = self.writer.lock().await;
        writer
            .write_all(&buf)
            .await
            .map_err(|e| IngestError::Sink(e.to_string()))?;
        writer
            .flush()
            .await
            .map_err(|e| IngestError::Sink(e.to_string()))
    }
}
