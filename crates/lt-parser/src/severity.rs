//! Severity classification from raw level tokens and message keywords.
//!
//! Rules are evaluated strictly in order and the first match wins:
//!
//! 1. level EMERGENCY / ALERT / CRITICAL / ERROR / FATAL → `Critical`
//! 2. keyword critical / fatal / emergency / alert, then error / fail / exception → `Critical`
//! 3. level or keyword WARNING / WARN → `Medium`
//! 4. level NOTICE / INFO → `Low`
//! 5. level or keyword DEBUG / TRACE → `Bug`
//!
//! Anything else is `Low`. A DEBUG line mentioning "error" is therefore
//! `Critical`, and an INFO line mentioning "debug" stays `Low`.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::Severity;

const CRITICAL_LEVELS: &[&str] = &["EMERGENCY", "ALERT", "CRITICAL", "ERROR", "FATAL"];
const WARNING_LEVELS: &[&str] = &["WARNING", "WARN"];
const LOW_LEVELS: &[&str] = &["NOTICE", "INFO"];
const BUG_LEVELS: &[&str] = &["DEBUG", "TRACE"];

/// Every level token the classifier knows about, upper-case.
pub const KNOWN_LEVELS: &[&str] = &[
    "EMERGENCY", "ALERT", "CRITICAL", "ERROR", "FATAL", "WARNING", "WARN", "NOTICE", "INFO",
    "DEBUG", "TRACE",
];

static RE_CRITICAL_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(critical|fatal|emergency|alert)\b").unwrap());

static RE_ERROR_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(error|fail|exception)\b").unwrap());

static RE_WARNING_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(warning|warn)\b").unwrap());

static RE_DEBUG_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(debug|trace)\b").unwrap());

/// Classify a line from its raw level token (if any) and free text.
pub fn classify(level: Option<&str>, text: &str) -> Severity {
    let level = level.map(|l| l.trim().to_ascii_uppercase());
    let level_in = |set: &[&str]| level.as_deref().is_some_and(|l| set.contains(&l));

    if level_in(CRITICAL_LEVELS) {
        return Severity::Critical;
    }
    if RE_CRITICAL_WORDS.is_match(text) || RE_ERROR_WORDS.is_match(text) {
        return Severity::Critical;
    }
    if level_in(WARNING_LEVELS) || RE_WARNING_WORDS.is_match(text) {
        return Severity::Medium;
    }
    if level_in(LOW_LEVELS) {
        return Severity::Low;
    }
    if level_in(BUG_LEVELS) || RE_DEBUG_WORDS.is_match(text) {
        return Severity::Bug;
    }
    Severity::Low
}

/// Whether `token` is a level word the classifier recognizes (case-insensitive).
pub fn is_known_level(token: &str) -> bool {
    let upper = token.to_ascii_uppercase();
    KNOWN_LEVELS.contains(&upper.as_str())
}
