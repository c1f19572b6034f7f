//! Catch-all parser for unrecognized formats with heuristic timestamp and
//! level detection.

use regex::Regex;
use std::sync::LazyLock;

use crate::clock::Clock;
use crate::parsers::LineParser;
use crate::types::LogRecord;
use crate::{severity, timestamp};

// Leading timestamp patterns, tried in order
static TIMESTAMP_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // 2024-01-15 10:30:45, 2024-01-15T10:30:45.123+00:00
        Regex::new(r"^\d{4}-\d{2}-\d{2}[T\s]\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|[+-]\d{2}:?\d{2})?")
            .unwrap(),
        // 15/01/2024 10:30:45
        Regex::new(r"^\d{2}/\d{2}/\d{4}\s+\d{2}:\d{2}:\d{2}").unwrap(),
        // Jan 15 10:30:45
        Regex::new(r"^[A-Z][a-z]{2}\s+\d{1,2}\s+\d{2}:\d{2}:\d{2}").unwrap(),
    ]
});

// ERROR, [ERROR], ERROR:
static RE_LEVEL_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[?([A-Za-z]+)\]?:?(?:\s|$)").unwrap());

/// Best-effort parser that accepts any content.
///
/// The channel is always `"application"` and the message is the whole line.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericLineParser;

impl LineParser for GenericLineParser {
    fn name(&self) -> &'static str {
        "Generic"
    }

    fn supports(&self, _content: &str) -> bool {
        true
    }

    fn is_catch_all(&self) -> bool {
        true
    }

    fn parse_line(&self, line: &str, line_number: usize, clock: &dyn Clock) -> LogRecord {
        let raw_ts = extract_timestamp(line);
        let rest = raw_ts.map_or(line, |ts| line[ts.len()..].trim_start());
        let level_token = extract_level(rest);
        let severity = severity::classify(level_token, line);

        LogRecord {
            timestamp: timestamp::normalize(raw_ts, clock),
            raw_line: line.to_string(),
            line_number,
            channel: Some("application".to_string()),
            level: level_token.unwrap_or(severity.as_str()).to_string(),
            severity,
            message: line.to_string(),
            context: None,
            extra: None,
            degraded: false,
        }
    }
}

/// The leading timestamp substring, if the line starts with one.
fn extract_timestamp(line: &str) -> Option<&str> {
    TIMESTAMP_PATTERNS
        .iter()
        .find_map(|re| re.find(line))
        .map(|m| m.as_str())
}

/// A recognized level word at the start of `rest`.
fn extract_level(rest: &str) -> Option<&str> {
    let caps = RE_LEVEL_TOKEN.captures(rest)?;
    let token = caps.get(1)?.as_str();
    severity::is_known_level(token).then_some(token)
}
