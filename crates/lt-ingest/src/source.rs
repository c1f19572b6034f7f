//! Log source abstraction: read whole-file content from disk or mocks.

use async_trait::async_trait;

use crate::error::{IngestError, IngestResult};
use crate::validate::FileValidator;

/// Supplies already-validated log content as text.
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Read the full content at `path`.
    async fn read_content(&self, path: &str) -> IngestResult<String>;

    /// Check if a source path exists and is readable.
    async fn exists(&self, path: &str) -> bool;
}

/// Reads logs from the local filesystem, enforcing upload policy first.
pub struct FileLogSource {
    validator: FileValidator,
}

impl FileLogSource {
    pub fn new(validator: FileValidator) -> Self {
        Self { validator }
    }
}

impl Default for FileLogSource {
    fn default() -> Self {
        Self::new(FileValidator::default())
    }
}

fn io_error(path: &str, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::NotFound(path.to_string())
    } else {
        IngestError::Io(format!("{path}: {e}"))
    }
}

#[async_trait]
impl LogSource for FileLogSource {
    async fn read_content(&self, path: &str) -> IngestResult<String> {
        self.validator.check_extension(path)?;

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| io_error(path, e))?;
        self.validator.check_size(metadata.len())?;

        let bytes = tokio::fs::read(path).await.map_err(|e| io_error(path, e))?;
        Ok(self.validator.check_text(bytes)?)
    }

    async fn exists(&self, path: &str) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use std::io::Write;

    fn write_temp(suffix: &str, bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    #[tokio::test]
    async fn reads_valid_log() {
        let file = write_temp(".log", b"line one\nline two\n");
        let path = file.path().to_str().unwrap();
        let content = FileLogSource::default().read_content(path).await.unwrap();
        assert_eq!(content, "line one\nline two\n");
    }

    #[tokio::test]
    async fn rejects_wrong_extension() {
        let file = write_temp(".csv", b"a,b,c\n");
        let path = file.path().to_str().unwrap();
        let err = FileLogSource::default().read_content(path).await.unwrap_err();
        assert!(matches!(
            err,
            IngestError::Validation(ValidationError::Extension(..))
        ));
    }

    #[tokio::test]
    async fn rejects_oversized_file() {
        let file = write_temp(".txt", &[b'x'; 64]);
        let path = file.path().to_str().unwrap();
        let source = FileLogSource::new(FileValidator::new(32, &["txt".to_string()]));
        let err = source.read_content(path).await.unwrap_err();
        assert!(matches!(
            err,
            IngestError::Validation(ValidationError::TooLarge { size: 64, max: 32 })
        ));
    }

    #[tokio::test]
    async fn rejects_binary_file() {
        let file = write_temp(".log", &[0xC3, 0x28, 0xA0, 0xA1]);
        let path = file.path().to_str().unwrap();
        let err = FileLogSource::default().read_content(path).await.unwrap_err();
        assert!(matches!(
            err,
            IngestError::Validation(ValidationError::NotText)
        ));
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let source = FileLogSource::default();
        let err = source.read_content("/no/such/file.log").await.unwrap_err();
        assert!(matches!(err, IngestError::NotFound(_)));
        assert!(!source.exists("/no/such/file.log").await);
    }
}
