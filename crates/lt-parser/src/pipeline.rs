//! Whole-file parse orchestration: detect once, then stream records.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::parsers::Records;
use crate::registry::FormatRegistry;
use crate::types::LogRecord;

/// Output of a single [`ParsePipeline::parse`] call.
///
/// `records` is lazy: nothing is parsed until it is iterated, and iterating
/// through [`Records::batches`] keeps at most one batch in memory.
pub struct ParseOutput<'a> {
    /// Name of the parser selected for the file.
    pub parser_name: &'static str,
    /// Provenance label attached to the records when persisted.
    pub source_label: &'a str,
    pub records: Records<'a>,
}

impl ParseOutput<'_> {
    /// Drain the stream into memory. Fine for small inputs and tests.
    pub fn collect_records(self) -> Vec<LogRecord> {
        self.records.collect()
    }
}

/// Stateless parsing front end, reusable across files.
pub struct ParsePipeline {
    registry: FormatRegistry,
    clock: Arc<dyn Clock>,
}

impl ParsePipeline {
    pub fn new(registry: FormatRegistry, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    /// Default registry and wall-clock fallback timestamps.
    pub fn with_defaults() -> Self {
        Self::new(FormatRegistry::with_defaults(), Arc::new(SystemClock))
    }

    /// Detect the file's format and return its lazily parsed records.
    pub fn parse<'a>(&'a self, content: &'a str, source_label: &'a str) -> ParseOutput<'a> {
        let parser = self.registry.select(content);
        tracing::debug!(
            parser = parser.name(),
            source = source_label,
            bytes = content.len(),
            "format selected"
        );

        ParseOutput {
            parser_name: parser.name(),
            source_label,
            records: parser.parse(content, self.clock.as_ref()),
        }
    }

    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// Names of the registered parsers, in selection order.
    pub fn available_parsers(&self) -> Vec<&'static str> {
        self.registry.parser_names()
    }
}

impl Default for ParsePipeline {
    fn default() -> Self {
        Self::with_defaults()
    }
}
