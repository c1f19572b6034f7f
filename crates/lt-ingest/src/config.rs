//! Ingestion configuration, loadable from TOML.

use serde::Deserialize;
use std::path::PathBuf;

use crate::error::{IngestError, IngestResult};

/// Top-level configuration for the ingester.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Records handed to the sink per batch.
    pub batch_size: usize,
    /// Upload size cap in bytes.
    pub max_file_size: u64,
    /// Accepted file extensions, compared case-insensitively.
    pub allowed_extensions: Vec<String>,
    /// Provenance label attached to every persisted batch.
    pub source_label: String,
    pub output: OutputConfig,
}

/// Where persisted records go.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// JSON-lines file to append to. Stdout when absent.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            batch_size: 100,
            max_file_size: 10 * 1024 * 1024,
            allowed_extensions: vec!["log".to_string(), "txt".to_string()],
            source_label: "uploaded-file".to_string(),
            output: OutputConfig::default(),
        }
    }
}

impl IngestConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> IngestResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IngestError::NotFound(path.to_string())
            } else {
                IngestError::Io(format!("{path}: {e}"))
            }
        })?;
        Self::from_toml(&contents)
    }

    /// Parse and validate config from TOML text.
    pub fn from_toml(contents: &str) -> IngestResult<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| IngestError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> IngestResult<()> {
        if self.batch_size == 0 {
            return Err(IngestError::Config("batch_size must be at least 1".into()));
        }
        if self.allowed_extensions.is_empty() {
            return Err(IngestError::Config(
                "allowed_extensions must not be empty".into(),
            ));
        }
        Ok(())
    }
}
