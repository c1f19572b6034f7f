//! File ingestion: read → detect format → parse → persist in batches.

use serde::Serialize;

use lt_parser::{LogStats, ParsePipeline, ParseStats, StatsAccumulator};

use crate::config::IngestConfig;
use crate::error::IngestResult;
use crate::sink::{RecordBatch, RecordSink};
use crate::source::LogSource;

/// Outcome of ingesting one file.
#[derive(Debug, Clone, Serialize)]
pub struct IngestSummary {
    pub path: String,
    pub source: String,
    /// Name of the parser selected for the file.
    pub parser: String,
    pub records: usize,
    pub batches: usize,
    pub parse: ParseStats,
    pub stats: LogStats,
}

/// Drives a [`ParsePipeline`] into a [`RecordSink`], one bounded batch at a time.
pub struct Ingestor {
    pipeline: ParsePipeline,
    batch_size: usize,
    source_label: String,
}

impl Ingestor {
    pub fn new(pipeline: ParsePipeline, config: &IngestConfig) -> Self {
        Self {
            pipeline,
            batch_size: config.batch_size.max(1),
            source_label: config.source_label.clone(),
        }
    }

    pub fn pipeline(&self) -> &ParsePipeline {
        &self.pipeline
    }

    /// Read `path` from `source` and persist its records into `sink`.
    pub async fn ingest(
        &self,
        path: &str,
        source: &dyn LogSource,
        sink: &dyn RecordSink,
    ) -> IngestResult<IngestSummary> {
        let content = source.read_content(path).await?;
        self.ingest_content(path, &content, sink).await
    }

    /// Persist already-read content. `path` is only used for reporting.
    ///
    /// On a sink error the file is abandoned and the error returned; batches
    /// written before the failure stay persisted.
    pub async fn ingest_content(
        &self,
        path: &str,
        content: &str,
        sink: &dyn RecordSink,
    ) -> IngestResult<IngestSummary> {
        let output = self.pipeline.parse(content, &self.source_label);
        let parser = output.parser_name;
        tracing::info!(path, parser, source = %self.source_label, "parsing log file");

        let mut batches = output.records.batches(self.batch_size);
        let mut stats = StatsAccumulator::new();
        let mut written = 0usize;

        for records in batches.by_ref() {
            stats.observe_all(&records);
            let batch = RecordBatch {
                source: self.source_label.clone(),
                index: written,
                records,
            };
            if let Err(e) = sink.write_batch(&batch).await {
                tracing::warn!(
                    path,
                    batch = written,
                    error = %e,
                    "sink rejected batch; earlier batches remain persisted"
                );
                return Err(e);
            }
            written += 1;
            tracing::debug!(path, batch = batch.index, size = batch.len(), "batch persisted");
        }

        let parse = batches.stats();
        let summary = IngestSummary {
            path: path.to_string(),
            source: self.source_label.clone(),
            parser: parser.to_string(),
            records: parse.records,
            batches: written,
            parse,
            stats: stats.finish(),
        };

        tracing::info!(
            path,
            parser,
            records = summary.records,
            batches = summary.batches,
            degraded = parse.degraded,
            fallback_timestamps = parse.fallback_timestamps,
            "log file ingested"
        );
        Ok(summary)
    }
}
