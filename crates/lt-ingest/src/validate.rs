//! Upload policy checks: size cap, extension allow-list, text content.

use std::path::Path;

use crate::config::IngestConfig;
use crate::error::ValidationError;

/// Rejects files the parser should never see.
#[derive(Debug, Clone)]
pub struct FileValidator {
    max_size: u64,
    allowed_extensions: Vec<String>,
}

impl FileValidator {
    pub fn new(max_size: u64, allowed_extensions: &[String]) -> Self {
        Self {
            max_size,
            allowed_extensions: allowed_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &IngestConfig) -> Self {
        Self::new(config.max_file_size, &config.allowed_extensions)
    }

    pub fn check_size(&self, size: u64) -> Result<(), ValidationError> {
        if size > self.max_size {
            return Err(ValidationError::TooLarge {
                size,
                max: self.max_size,
            });
        }
        Ok(())
    }

    pub fn check_extension(&self, path: &str) -> Result<(), ValidationError> {
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if self.allowed_extensions.contains(&ext) {
            Ok(())
        } else {
            Err(ValidationError::Extension(
                ext,
                self.allowed_extensions.join(", "),
            ))
        }
    }

    /// Decode raw bytes as UTF-8 text.
    pub fn check_text(&self, bytes: Vec<u8>) -> Result<String, ValidationError> {
        String::from_utf8(bytes).map_err(|_| ValidationError::NotText)
    }
}

impl Default for FileValidator {
    fn default() -> Self {
        Self::from_config(&IngestConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_cap_is_inclusive() {
        let v = FileValidator::default();
        assert!(v.check_size(10 * 1024 * 1024).is_ok());
        assert_eq!(
            v.check_size(10 * 1024 * 1024 + 1),
            Err(ValidationError::TooLarge {
                size: 10_485_761,
                max: 10_485_760
            })
        );
    }

    #[test]
    fn extensions_case_insensitive() {
        let v = FileValidator::default();
        assert!(v.check_extension("/tmp/app.log").is_ok());
        assert!(v.check_extension("/tmp/NOTES.TXT").is_ok());
        assert!(matches!(
            v.check_extension("/tmp/dump.gz"),
            Err(ValidationError::Extension(ext, _)) if ext == "gz"
        ));
        assert!(v.check_extension("/tmp/no_extension").is_err());
    }

    #[test]
    fn leading_dots_in_config_ignored() {
        let v = FileValidator::new(10, &[".LOG".to_string()]);
        assert!(v.check_extension("x.log").is_ok());
    }

    #[test]
    fn rejects_binary_content() {
        let v = FileValidator::default();
        assert_eq!(v.check_text(b"plain text".to_vec()).unwrap(), "plain text");
        assert_eq!(
            v.check_text(vec![0xff, 0xfe, 0x00]),
            Err(ValidationError::NotText)
        );
    }
}
