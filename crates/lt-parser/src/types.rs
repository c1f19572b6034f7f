//! Core record types produced by the parsing pipeline.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

// ── Severity ──────────────────────────────────────────────────

/// Normalized severity, distinct from the raw level token found in the source.
///
/// Serialized by variant name (`"Critical"`, `"Medium"`, `"Low"`, `"Bug"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    Medium,
    Low,
    Bug,
}

impl Severity {
    /// All variants, in reporting order.
    pub const ALL: [Severity; 4] = [Self::Critical, Self::Medium, Self::Low, Self::Bug];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Bug => "Bug",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Timestamp ─────────────────────────────────────────────────

/// A record timestamp, tagged with whether it came from the line itself.
///
/// `Fallback` carries the processing instant substituted when the source
/// timestamp was missing or matched none of the known layouts. Both variants
/// always hold a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum LogTimestamp {
    Parsed(DateTime<FixedOffset>),
    Fallback(DateTime<FixedOffset>),
}

impl LogTimestamp {
    pub fn value(&self) -> DateTime<FixedOffset> {
        match self {
            Self::Parsed(ts) | Self::Fallback(ts) => *ts,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

// ── Log Record ────────────────────────────────────────────────

/// One normalized log line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub timestamp: LogTimestamp,
    /// The trimmed source line, otherwise untouched.
    pub raw_line: String,
    /// 1-based position in the source content.
    pub line_number: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// Level token as written in the source (e.g. "ERROR", "Warning").
    pub level: String,
    pub severity: Severity,
    pub message: String,
    /// Structured context decoded from the line, `None` when absent or malformed.
    pub context: Option<serde_json::Map<String, serde_json::Value>>,
    /// Trailing "extra" fragment (Monolog), `None` when absent or malformed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<serde_json::Value>,
    /// Set when the line did not conform to its file's detected format.
    #[serde(default)]
    pub degraded: bool,
}
