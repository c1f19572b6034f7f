//! Symfony/Monolog line parser.
//!
//! `[2025-07-03T23:01:41.970023+00:00] doctrine.INFO: Query executed {"sql":"SELECT 1"} []`

use regex::Regex;
use std::sync::LazyLock;

use crate::clock::Clock;
use crate::parsers::{LineParser, clean_message, degraded_record, sample_lines};
use crate::types::LogRecord;
use crate::{severity, timestamp};

// [TIMESTAMP] CHANNEL.LEVEL: MESSAGE {CONTEXT} [EXTRA]
// The extra fragment is only recognized after a context fragment, and an
// empty context may be written as `[]`.
static RE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\[(?P<ts>[^\]]+)\]\s+(?P<channel>[^.\s\]]+)\.(?P<level>[A-Za-z]+):\s*(?P<message>[^{]*?)\s*(?:(?P<context>\{.*\}|\[\])\s*(?P<extra>\[.*\])?)?\s*$",
    )
    .unwrap()
});

// Detection only needs the bracketed ISO-like timestamp and `channel.LEVEL:`.
static RE_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}[^\]]*\]\s+[^.\s\]]+\.[A-Za-z]+:").unwrap()
});

/// Parser for `[timestamp] channel.LEVEL: message {context} [extra]` lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonologLineParser;

impl LineParser for MonologLineParser {
    fn name(&self) -> &'static str {
        "Symfony/Monolog"
    }

    fn supports(&self, content: &str) -> bool {
        sample_lines(content).any(|line| RE_HEAD.is_match(line))
    }

    fn parse_line(&self, line: &str, line_number: usize, clock: &dyn Clock) -> LogRecord {
        let Some(caps) = RE_LINE.captures(line) else {
            return degraded_record(line, line_number, clock);
        };

        let level = &caps["level"];
        let message = clean_message(&caps["message"]);

        LogRecord {
            timestamp: timestamp::normalize(Some(&caps["ts"]), clock),
            raw_line: line.to_string(),
            line_number,
            channel: Some(caps["channel"].to_string()),
            level: level.to_string(),
            severity: severity::classify(Some(level), &message),
            message,
            context: caps.name("context").and_then(|m| decode_context(m.as_str())),
            extra: caps
                .name("extra")
                .and_then(|m| serde_json::from_str(m.as_str()).ok()),
            degraded: false,
        }
    }
}

/// Decode a context fragment. Monolog writes an empty context as `[]`.
fn decode_context(fragment: &str) -> Option<serde_json::Map<String, serde_json::Value>> {
    match serde_json::from_str(fragment).ok()? {
        serde_json::Value::Object(map) => Some(map),
        serde_json::Value::Array(items) if items.is_empty() => Some(serde_json::Map::new()),
        _ => None,
    }
}
