//! E2E tests for format detection, field extraction and severity
//! classification across the parser and ingest crates.

mod helpers;

use serde_json::json;

use helpers::{TestHarness, fixed_now, parse};
use lt_parser::{LogTimestamp, Severity};

/// A Monolog line yields every field, with the context decoded as JSON.
#[test]
fn e2e_monolog_line_fully_extracted() {
    let (parser, records) = parse(
        r#"[2025-07-03T23:01:41.970023+00:00] doctrine.INFO: Query executed {"sql":"SELECT 1"} []"#,
    );

    assert_eq!(parser, "Symfony/Monolog");
    assert_eq!(records.len(), 1);
    let r = &records[0];
    assert_eq!(r.timestamp.value().to_rfc3339(), "2025-07-03T23:01:41.970023+00:00");
    assert_eq!(r.channel.as_deref(), Some("doctrine"));
    assert_eq!(r.level, "INFO");
    assert_eq!(r.severity, Severity::Low);
    assert_eq!(r.message, "Query executed");
    assert_eq!(
        serde_json::Value::Object(r.context.clone().unwrap()),
        json!({"sql": "SELECT 1"})
    );
}

/// Unstructured lines fall through to the generic parser; "error" makes them critical.
#[test]
fn e2e_generic_error_keyword() {
    let line = "2024-01-15 10:30:45 ERROR Something went wrong";
    let (parser, records) = parse(line);

    assert_eq!(parser, "Generic");
    let r = &records[0];
    assert_eq!(r.severity, Severity::Critical);
    assert_eq!(r.channel.as_deref(), Some("application"));
    assert_eq!(r.message, line);
    assert_eq!(r.timestamp.value().to_rfc3339(), "2024-01-15T10:30:45+00:00");
}

/// No timestamp and no level keyword: low severity at the clock's instant.
#[test]
fn e2e_noise_line_gets_fallback() {
    let (_, records) = parse("asdkjalksdj random noise");

    let r = &records[0];
    assert_eq!(r.severity, Severity::Low);
    assert_eq!(r.message, "asdkjalksdj random noise");
    assert_eq!(r.timestamp, LogTimestamp::Fallback(fixed_now().fixed_offset()));
}

/// Level tokens are matched regardless of case.
#[test]
fn e2e_mixed_case_level() {
    let (_, monolog) = parse("[2025-07-03T10:00:00+00:00] app.Warning: Disk usage high [] []");
    assert_eq!(monolog[0].level, "Warning");
    assert_eq!(monolog[0].severity, Severity::Medium);

    let (_, generic) = parse("Warning: Disk usage high");
    assert_eq!(generic[0].severity, Severity::Medium);
}

/// Every bundled sample is routed to the parser built for it.
#[tokio::test]
async fn e2e_samples_detected() {
    let h = TestHarness::with_samples();

    let cases = [
        ("/var/www/var/log/prod.log", "Symfony/Monolog"),
        ("/var/log/nginx/access.log", "Apache/Nginx"),
        ("/var/log/app.log", "Generic"),
    ];
    for (path, expected) in cases {
        let summary = h.ingest(path).await.unwrap();
        assert_eq!(summary.parser, expected, "{path}");
    }
}

/// Access log statuses map to levels, and the request becomes the message.
#[tokio::test]
async fn e2e_access_log_statuses() {
    let h = TestHarness::with_samples();
    let summary = h.ingest("/var/log/nginx/access.log").await.unwrap();

    assert_eq!(summary.records, 4);
    assert_eq!(summary.stats.severity_counts.critical, 2);
    assert_eq!(summary.stats.severity_counts.low, 2);

    let records = h.records();
    assert_eq!(records[0].message, "GET /logs HTTP/1.1");
    assert_eq!(records[2].level, "ERROR");
    assert_eq!(records[2].context.as_ref().unwrap()["user"], "admin");
    assert!(records.iter().all(|r| r.channel.as_deref() == Some("access")));
}

/// Stack-trace continuation lines inside a Monolog file degrade, not fail.
#[tokio::test]
async fn e2e_monolog_stack_frame_degrades() {
    let h = TestHarness::with_samples();
    let summary = h.ingest("/var/www/var/log/prod.log").await.unwrap();
    assert_eq!(summary.parse.degraded, 1);

    let records = h.records();
    let frame = records.iter().find(|r| r.degraded).unwrap();
    assert_eq!(frame.line_number, 7);
    assert_eq!(frame.channel.as_deref(), Some("unknown"));
    assert_eq!(frame.level, "INFO");
    assert_eq!(frame.severity, Severity::Low);
    assert!(frame.timestamp.is_fallback());
    assert!(frame.message.starts_with("#0 /var/www/vendor"));
}

/// Line numbers are strictly increasing and skip blank lines.
#[tokio::test]
async fn e2e_line_numbers_monotonic() {
    let mut h = TestHarness::new();
    h.add_file("/tmp/gaps.log", "one\n\n\ntwo\n   \nthree");
    let summary = h.ingest("/tmp/gaps.log").await.unwrap();

    assert_eq!(summary.records, 3);
    assert_eq!(summary.parse.blank_lines, 3);
    let numbers: Vec<usize> = h.records().iter().map(|r| r.line_number).collect();
    assert_eq!(numbers, vec![1, 4, 6]);
}

/// Parsing the same content twice gives identical records.
#[tokio::test]
async fn e2e_parse_is_idempotent() {
    let h = TestHarness::with_samples();
    for path in ["/var/www/var/log/prod.log", "/var/log/nginx/access.log", "/var/log/app.log"] {
        h.ingest(path).await.unwrap();
    }
    let first = h.records();

    let again = TestHarness::with_samples();
    for path in ["/var/www/var/log/prod.log", "/var/log/nginx/access.log", "/var/log/app.log"] {
        again.ingest(path).await.unwrap();
    }
    assert_eq!(first, again.records());
}

/// Every record carries a timestamp and one of the four severities.
#[tokio::test]
async fn e2e_every_record_classified() {
    let h = TestHarness::with_samples();
    for path in ["/var/www/var/log/prod.log", "/var/log/nginx/access.log", "/var/log/app.log"] {
        h.ingest(path).await.unwrap();
    }

    let records = h.records();
    assert_eq!(records.len(), 7 + 4 + 7);
    for r in &records {
        assert!(Severity::ALL.contains(&r.severity));
        assert!(!r.raw_line.is_empty());
        assert!(!r.level.is_empty());
        if r.timestamp.is_fallback() {
            assert_eq!(r.timestamp.value(), fixed_now().fixed_offset());
        }
    }
}

/// Plain-text lines pick up their level, falling back to the severity label.
#[tokio::test]
async fn e2e_generic_levels() {
    let h = TestHarness::with_samples();
    h.ingest("/var/log/app.log").await.unwrap();

    let levels: Vec<(String, Severity)> = h
        .records()
        .into_iter()
        .map(|r| (r.level, r.severity))
        .collect();
    assert_eq!(
        levels,
        vec![
            ("INFO".to_string(), Severity::Low),
            ("ERROR".to_string(), Severity::Critical),
            ("Low".to_string(), Severity::Low),
            ("Low".to_string(), Severity::Low),
            ("Low".to_string(), Severity::Low),
            ("WARNING".to_string(), Severity::Medium),
            ("DEBUG".to_string(), Severity::Bug),
        ]
    );
}
