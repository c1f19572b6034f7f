//! Summary statistics over parsed records: severity counts, time range,
//! top channels.
//!
//! Built incrementally so it can ride along the batched persistence path
//! without holding the whole file.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::collections::HashMap;

use crate::types::{LogRecord, Severity};

/// How many channels [`LogStats::top_channels`] keeps.
pub const TOP_CHANNELS: usize = 10;

/// Per-severity totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub medium: usize,
    pub low: usize,
    pub bug: usize,
}

impl SeverityCounts {
    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Bug => self.bug,
        }
    }

    fn bump(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
            Severity::Bug => self.bug += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub earliest: Option<DateTime<FixedOffset>>,
    pub latest: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelCount {
    pub channel: String,
    pub count: usize,
}

/// Finished statistics for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogStats {
    pub total: usize,
    pub severity_counts: SeverityCounts,
    /// Range over parsed timestamps only; fallback instants are excluded.
    pub time_range: TimeRange,
    pub top_channels: Vec<ChannelCount>,
    pub degraded: usize,
    pub fallback_timestamps: usize,
}

/// Running accumulator fed one record at a time.
#[derive(Debug, Default)]
pub struct StatsAccumulator {
    total: usize,
    severity_counts: SeverityCounts,
    time_range: TimeRange,
    channels: HashMap<String, usize>,
    degraded: usize,
    fallback_timestamps: usize,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, record: &LogRecord) {
        self.total += 1;
        self.severity_counts.bump(record.severity);

        if record.timestamp.is_fallback() {
            self.fallback_timestamps += 1;
        } else {
            let ts = record.timestamp.value();
            let range = &mut self.time_range;
            range.earliest = Some(range.earliest.map_or(ts, |e| e.min(ts)));
            range.latest = Some(range.latest.map_or(ts, |l| l.max(ts)));
        }

        if let Some(ref channel) = record.channel {
            *self.channels.entry(channel.clone()).or_default() += 1;
        }
        if record.degraded {
            self.degraded += 1;
        }
    }

    pub fn observe_all<'r>(&mut self, records: impl IntoIterator<Item = &'r LogRecord>) {
        for record in records {
            self.observe(record);
        }
    }

    pub fn finish(self) -> LogStats {
        let mut top_channels: Vec<ChannelCount> = self
            .channels
            .into_iter()
            .map(|(channel, count)| ChannelCount { channel, count })
            .collect();
        // Highest count first, ties by name for stable output
        top_channels.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.channel.cmp(&b.channel)));
        top_channels.truncate(TOP_CHANNELS);

        LogStats {
            total: self.total,
            severity_counts: self.severity_counts,
            time_range: self.time_range,
            top_channels,
            degraded: self.degraded,
            fallback_timestamps: self.fallback_timestamps,
        }
    }
}

impl LogStats {
    pub fn from_records<'r>(records: impl IntoIterator<Item = &'r LogRecord>) -> Self {
        let mut acc = StatsAccumulator::new();
        acc.observe_all(records);
        acc.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::pipeline::ParsePipeline;
    use crate::registry::FormatRegistry;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn records(content: &str) -> Vec<LogRecord> {
        let clock = FixedClock(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap());
        let pipeline = ParsePipeline::new(FormatRegistry::with_defaults(), Arc::new(clock));
        pipeline.parse(content, "test").collect_records()
    }

    #[test]
    fn counts_severities_and_channels() {
        let content = "\
[2025-07-03T10:00:00+00:00] doctrine.INFO: Query executed [] []
[2025-07-03T10:00:05+00:00] request.ERROR: Uncaught exception [] []
[2025-07-03T10:00:03+00:00] doctrine.DEBUG: Connection reused [] []
[2025-07-03T10:00:04+00:00] app.WARNING: Slow request [] []
";
        let stats = LogStats::from_records(&records(content));
        assert_eq!(stats.total, 4);
        assert_eq!(stats.severity_counts.get(Severity::Critical), 1);
        assert_eq!(stats.severity_counts.medium, 1);
        assert_eq!(stats.severity_counts.low, 1);
        assert_eq!(stats.severity_counts.bug, 1);
        assert_eq!(stats.top_channels[0].channel, "doctrine");
        assert_eq!(stats.top_channels[0].count, 2);
        assert_eq!(stats.top_channels.len(), 3);

        let range = stats.time_range;
        assert_eq!(range.earliest.unwrap().to_rfc3339(), "2025-07-03T10:00:00+00:00");
        assert_eq!(range.latest.unwrap().to_rfc3339(), "2025-07-03T10:00:05+00:00");
    }

    #[test]
    fn fallback_timestamps_excluded_from_range() {
        let content = "2024-01-15 10:30:45 INFO ok\nno timestamp here\n";
        let stats = LogStats::from_records(&records(content));
        assert_eq!(stats.fallback_timestamps, 1);
        assert_eq!(
            stats.time_range.latest.unwrap().to_rfc3339(),
            "2024-01-15T10:30:45+00:00"
        );
    }

    #[test]
    fn degraded_lines_counted() {
        let content = "[2025-07-03T10:00:00+00:00] app.INFO: ok [] []\nstack frame #1\n";
        let stats = LogStats::from_records(&records(content));
        assert_eq!(stats.degraded, 1);
        assert_eq!(stats.fallback_timestamps, 1);
    }

    #[test]
    fn empty_input() {
        let stats = StatsAccumulator::new().finish();
        assert_eq!(stats, LogStats::default());
    }

    #[test]
    fn top_channels_capped() {
        let content: String = (0..15)
            .map(|i| format!("[2025-07-03T10:00:00+00:00] ch{i:02}.INFO: m [] []\n"))
            .collect();
        let stats = LogStats::from_records(&records(&content));
        assert_eq!(stats.top_channels.len(), TOP_CHANNELS);
        assert_eq!(stats.top_channels[0].channel, "ch00");
    }
}
