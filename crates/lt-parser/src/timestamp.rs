//! Timestamp normalization against an ordered list of known layouts.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime};

use crate::clock::Clock;
use crate::types::LogTimestamp;

/// A known timestamp layout. Tried in declaration order of [`LAYOUTS`].
#[derive(Debug, Clone, Copy)]
enum Layout {
    /// RFC 3339 / ISO 8601 with offset, optional fractional seconds.
    Rfc3339,
    /// A chrono format carrying its own UTC offset.
    Offset(&'static str),
    /// A chrono format without offset; interpreted as UTC.
    Naive(&'static str),
    /// A chrono format without year or offset (syslog); year taken from `now`.
    Yearless(&'static str),
}

const LAYOUTS: &[Layout] = &[
    Layout::Rfc3339,
    // 2024-01-15T10:30:45.123+0000
    Layout::Offset("%Y-%m-%dT%H:%M:%S%.f%z"),
    // 2024-01-15 10:30:45 +0000
    Layout::Offset("%Y-%m-%d %H:%M:%S%.f %z"),
    // 15/Jan/2024:10:30:45 +0000 (Apache / combined log)
    Layout::Offset("%d/%b/%Y:%H:%M:%S %z"),
    // 2024-01-15T10:30:45.123
    Layout::Naive("%Y-%m-%dT%H:%M:%S%.f"),
    // 2024-01-15 10:30:45
    Layout::Naive("%Y-%m-%d %H:%M:%S%.f"),
    // 15/01/2024 10:30:45
    Layout::Naive("%d/%m/%Y %H:%M:%S"),
    // Jan 15 10:30:45
    Layout::Yearless("%b %e %H:%M:%S"),
];

/// Parse a raw timestamp substring, returning the first layout that fits.
///
/// `now` only supplies the year for syslog-style timestamps.
pub fn parse(raw: &str, now: DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
    let raw = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if raw.is_empty() {
        return None;
    }

    LAYOUTS.iter().find_map(|layout| match *layout {
        Layout::Rfc3339 => DateTime::parse_from_rfc3339(&raw).ok(),
        Layout::Offset(fmt) => DateTime::parse_from_str(&raw, fmt).ok(),
        Layout::Naive(fmt) => NaiveDateTime::parse_from_str(&raw, fmt)
            .ok()
            .map(|ndt| ndt.and_utc().fixed_offset()),
        Layout::Yearless(fmt) => {
            let with_year = format!("{} {raw}", now.year());
            NaiveDateTime::parse_from_str(&with_year, &format!("%Y {fmt}"))
                .ok()
                .map(|ndt| ndt.and_utc().fixed_offset())
        }
    })
}

/// Normalize an optional raw timestamp, falling back to the clock's instant.
///
/// Never fails: a missing or unparseable timestamp yields
/// [`LogTimestamp::Fallback`] so the line is still emitted.
pub fn normalize(raw: Option<&str>, clock: &dyn Clock) -> LogTimestamp {
    let now = clock.now().fixed_offset();
    match raw.and_then(|r| parse(r, now)) {
        Some(ts) => LogTimestamp::Parsed(ts),
        None => LogTimestamp::Fallback(now),
    }
}
