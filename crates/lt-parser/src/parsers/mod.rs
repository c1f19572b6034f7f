//! Format-specific line parsers and the lazy record stream they produce.
//!
//! Each parser decides once, from the start of a file, whether it recognizes
//! the format (`supports`), then turns every non-blank line into exactly one
//! [`LogRecord`]. Lines that break the detected structure become degraded
//! records; nothing here ever drops a line.

pub mod access;
pub mod generic;
pub mod monolog;

pub use access::AccessLogParser;
pub use generic::GenericLineParser;
pub use monolog::MonologLineParser;

use serde::Serialize;

use crate::clock::Clock;
use crate::timestamp;
use crate::types::{LogRecord, Severity};

/// Non-blank lines sampled from the head of a file for format detection.
pub const DETECTION_SAMPLE_LINES: usize = 5;

/// Messages longer than this (in characters) are shortened for display.
pub const MAX_MESSAGE_CHARS: usize = 200;

/// A line-oriented log format strategy.
///
/// Implementations are stateless and shared read-only across files.
pub trait LineParser: Send + Sync {
    /// Human-readable format name reported alongside parsed output.
    fn name(&self) -> &'static str;

    /// Whether this parser recognizes the file, judged from its content.
    fn supports(&self, content: &str) -> bool;

    /// Parse one trimmed, non-blank line. Must not fail.
    fn parse_line(&self, line: &str, line_number: usize, clock: &dyn Clock) -> LogRecord;

    /// True only for a parser whose `supports` accepts any content.
    fn is_catch_all(&self) -> bool {
        false
    }
}

impl<'p> dyn LineParser + 'p {
    /// Lazily parse whole-file content, one record per non-blank line.
    pub fn parse<'a>(&'a self, content: &'a str, clock: &'a dyn Clock) -> Records<'a> {
        Records::new(self, content, clock)
    }
}

// ── Record stream ─────────────────────────────────────────────

/// Counters accumulated while a file's records are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    pub records: usize,
    pub blank_lines: usize,
    /// Lines that did not match the detected format's structure.
    pub degraded: usize,
    /// Records whose timestamp is the processing instant.
    pub fallback_timestamps: usize,
}

/// Lazy, in-order iterator over a file's records.
pub struct Records<'a> {
    parser: &'a dyn LineParser,
    clock: &'a dyn Clock,
    lines: std::iter::Enumerate<std::str::Split<'a, char>>,
    stats: ParseStats,
}

impl<'a> Records<'a> {
    pub fn new(parser: &'a dyn LineParser, content: &'a str, clock: &'a dyn Clock) -> Self {
        Self {
            parser,
            clock,
            lines: content.split('\n').enumerate(),
            stats: ParseStats::default(),
        }
    }

    /// Counters for the records yielded so far.
    pub fn stats(&self) -> ParseStats {
        self.stats
    }

    /// Group the remaining records into chunks of at most `size` (minimum 1).
    pub fn batches(self, size: usize) -> Batches<'a> {
        Batches {
            records: self,
            size: size.max(1),
        }
    }
}

impl Iterator for Records<'_> {
    type Item = LogRecord;

    fn next(&mut self) -> Option<LogRecord> {
        for (index, line) in self.lines.by_ref() {
            let line = line.trim();
            if line.is_empty() {
                self.stats.blank_lines += 1;
                continue;
            }

            let record = self.parser.parse_line(line, index + 1, self.clock);
            self.stats.records += 1;
            if record.degraded {
                self.stats.degraded += 1;
                tracing::debug!(
                    line_number = record.line_number,
                    parser = self.parser.name(),
                    "line does not match detected format"
                );
            }
            if record.timestamp.is_fallback() {
                self.stats.fallback_timestamps += 1;
            }
            return Some(record);
        }
        None
    }
}

/// Fixed-size chunks of a [`Records`] stream, preserving line order.
pub struct Batches<'a> {
    records: Records<'a>,
    size: usize,
}

impl Batches<'_> {
    pub fn stats(&self) -> ParseStats {
        self.records.stats()
    }
}

impl Iterator for Batches<'_> {
    type Item = Vec<LogRecord>;

    fn next(&mut self) -> Option<Vec<LogRecord>> {
        let batch: Vec<LogRecord> = self.records.by_ref().take(self.size).collect();
        if batch.is_empty() { None } else { Some(batch) }
    }
}

// ── Shared helpers ────────────────────────────────────────────

/// First few non-blank, trimmed lines of `content`.
pub(crate) fn sample_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(DETECTION_SAMPLE_LINES)
}

/// Trim a message and cap it at [`MAX_MESSAGE_CHARS`], marking the cut with "...".
pub(crate) fn clean_message(message: &str) -> String {
    let message = message.trim();
    if message.chars().count() > MAX_MESSAGE_CHARS {
        let kept: String = message.chars().take(MAX_MESSAGE_CHARS - 3).collect();
        format!("{kept}...")
    } else {
        message.to_string()
    }
}

/// Record for a line that does not fit its file's detected structure.
pub(crate) fn degraded_record(line: &str, line_number: usize, clock: &dyn Clock) -> LogRecord {
    LogRecord {
        timestamp: timestamp::normalize(None, clock),
        raw_line: line.to_string(),
        line_number,
        channel: Some("unknown".to_string()),
        level: "INFO".to_string(),
        severity: Severity::Low,
        message: line.to_string(),
        context: None,
        extra: None,
        degraded: true,
    }
}
