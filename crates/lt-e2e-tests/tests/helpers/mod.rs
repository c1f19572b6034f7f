//! Shared test harness for E2E integration tests.
//!
//! Wires a fixed-clock pipeline, a `MockLogSource` and a `MemorySink`
//! through a real `Ingestor`.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use lt_ingest::{IngestConfig, IngestResult, IngestSummary, Ingestor, MemorySink, MockLogSource};
use lt_parser::{FixedClock, FormatRegistry, LogRecord, ParsePipeline};

/// Instant every fallback timestamp resolves to.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap()
}

pub fn pipeline() -> ParsePipeline {
    ParsePipeline::new(FormatRegistry::with_defaults(), Arc::new(FixedClock(fixed_now())))
}

/// Parse `content` directly, without a sink.
pub fn parse(content: &str) -> (&'static str, Vec<LogRecord>) {
    let pipeline = pipeline();
    let output = pipeline.parse(content, "test");
    (output.parser_name, output.collect_records())
}

/// End-to-end harness: mock source → ingestor → memory sink.
pub struct TestHarness {
    pub source: MockLogSource,
    pub sink: MemorySink,
    pub ingestor: Ingestor,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_config(IngestConfig::default())
    }

    pub fn with_config(config: IngestConfig) -> Self {
        Self {
            source: MockLogSource::new(),
            sink: MemorySink::new(),
            ingestor: Ingestor::new(pipeline(), &config),
        }
    }

    /// Harness whose sink rejects every batch after the first `n`.
    pub fn with_failing_sink(n: usize) -> Self {
        let mut h = Self::new();
        h.sink = MemorySink::failing_after(n);
        h
    }

    /// Harness preloaded with the bundled Monolog, access and plain-text samples.
    pub fn with_samples() -> Self {
        let mut h = Self::new();
        for sample in [
            MockLogSource::with_monolog_sample(),
            MockLogSource::with_access_sample(),
            MockLogSource::with_plaintext_sample(),
        ] {
            h.source.merge(sample);
        }
        h
    }

    pub fn add_file(&mut self, path: &str, content: impl Into<String>) {
        self.source.add_file(path, content);
    }

    pub async fn ingest(&self, path: &str) -> IngestResult<IngestSummary> {
        self.ingestor.ingest(path, &self.source, &self.sink).await
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.sink.records()
    }
}

/// `n` well-formed Monolog lines, one second apart.
pub fn monolog_lines(n: usize) -> String {
    (0..n)
        .map(|i| {
            format!(
                "[2025-07-03T10:{:02}:{:02}+00:00] app.INFO: Event {i} [] []\n",
                i / 60,
                i % 60
            )
        })
        .collect()
}
