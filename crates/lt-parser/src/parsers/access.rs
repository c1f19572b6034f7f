//! Apache / Nginx access log parser (common and combined formats).

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

use crate::clock::Clock;
use crate::parsers::{LineParser, clean_message, degraded_record, sample_lines};
use crate::types::LogRecord;
use crate::{severity, timestamp};

// CLIENT IDENT USER [DATE] "REQUEST" STATUS BYTES ["REFERER" "AGENT"]
static RE_ACCESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?P<client>\S+)\s+\S+\s+(?P<user>\S+)\s+\[(?P<ts>[^\]]+)\]\s+"(?P<request>[^"]*)"\s+(?P<status>\d{3})\s+(?P<bytes>\d+|-)(?:\s+"(?P<referer>[^"]*)"\s+"(?P<agent>[^"]*)")?"#,
    )
    .unwrap()
});

/// Parser for HTTP server access logs.
///
/// Status codes of 400 and above are reported with level `ERROR`,
/// everything else as `INFO`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessLogParser;

impl LineParser for AccessLogParser {
    fn name(&self) -> &'static str {
        "Apache/Nginx"
    }

    fn supports(&self, content: &str) -> bool {
        let (total, matched) = sample_lines(content).fold((0usize, 0usize), |(t, m), line| {
            (t + 1, m + usize::from(RE_ACCESS.is_match(line)))
        });
        // Majority vote
        total > 0 && matched > total / 2
    }

    fn parse_line(&self, line: &str, line_number: usize, clock: &dyn Clock) -> LogRecord {
        let Some(caps) = RE_ACCESS.captures(line) else {
            return degraded_record(line, line_number, clock);
        };

        let status: u16 = caps["status"].parse().unwrap_or_default();
        let level = if status >= 400 { "ERROR" } else { "INFO" };
        let message = clean_message(&caps["request"]);

        let mut context = Map::new();
        context.insert("client".into(), Value::from(&caps["client"]));
        if &caps["user"] != "-" {
            context.insert("user".into(), Value::from(&caps["user"]));
        }
        context.insert("status".into(), Value::from(status));
        if let Ok(bytes) = caps["bytes"].parse::<u64>() {
            context.insert("bytes".into(), Value::from(bytes));
        }
        for (group, key) in [("referer", "referer"), ("agent", "user_agent")] {
            if let Some(m) = caps.name(group).filter(|m| m.as_str() != "-") {
                context.insert(key.into(), Value::from(m.as_str()));
            }
        }

        LogRecord {
            timestamp: timestamp::normalize(Some(&caps["ts"]), clock),
            raw_line: line.to_string(),
            line_number,
            channel: Some("access".to_string()),
            level: level.to_string(),
            severity: severity::classify(Some(level), &message),
            message,
            context: Some(context),
            extra: None,
            degraded: false,
        }
    }
}
