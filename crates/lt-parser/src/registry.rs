//! Ordered format registry.
//!
//! Parsers are consulted in registration order and the first whose
//! `supports` accepts the file wins. The final slot always holds a catch-all,
//! so selection cannot come back empty.

use crate::error::{ParseError, ParseResult};
use crate::parsers::{AccessLogParser, GenericLineParser, LineParser, MonologLineParser};

/// Immutable, ordered collection of line parsers ending in a catch-all.
pub struct FormatRegistry {
    structured: Vec<Box<dyn LineParser>>,
    fallback: Box<dyn LineParser>,
}

impl FormatRegistry {
    /// Build a registry from parsers in priority order.
    ///
    /// Fails when the list is empty, when the last parser is not a catch-all,
    /// or when a catch-all appears before the end (shadowing later entries).
    pub fn new(mut parsers: Vec<Box<dyn LineParser>>) -> ParseResult<Self> {
        let fallback = parsers
            .pop()
            .ok_or_else(|| ParseError::NoParserAvailable("registry is empty".into()))?;

        if !fallback.is_catch_all() {
            return Err(ParseError::NoParserAvailable(format!(
                "last registered parser '{}' is not a catch-all",
                fallback.name()
            )));
        }
        if let Some(shadowing) = parsers.iter().find(|p| p.is_catch_all()) {
            return Err(ParseError::InvalidParser(format!(
                "catch-all parser '{}' must be registered last",
                shadowing.name()
            )));
        }

        Ok(Self {
            structured: parsers,
            fallback,
        })
    }

    /// Monolog, then access logs, then the generic fallback.
    pub fn with_defaults() -> Self {
        Self {
            structured: vec![Box::new(MonologLineParser), Box::new(AccessLogParser)],
            fallback: Box::new(GenericLineParser),
        }
    }

    /// Pick the parser for a whole file.
    pub fn select(&self, content: &str) -> &dyn LineParser {
        self.structured
            .iter()
            .find(|p| p.supports(content))
            .unwrap_or(&self.fallback)
            .as_ref()
    }

    /// Registered parser names in selection order.
    pub fn parser_names(&self) -> Vec<&'static str> {
        self.iter().map(|p| p.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn LineParser> {
        self.structured
            .iter()
            .chain(std::iter::once(&self.fallback))
            .map(|p| -> &dyn LineParser { p.as_ref() })
    }

    /// Total number of registered parsers, fallback included.
    pub fn len(&self) -> usize {
        self.structured.len() + 1
    }

    /// Never true: the catch-all is always present.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
