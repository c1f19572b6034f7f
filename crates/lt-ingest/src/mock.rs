//! Mock log source for testing: serves pre-loaded log content.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::{IngestError, IngestResult};
use crate::source::LogSource;

/// A mock log source that serves pre-loaded content by path.
pub struct MockLogSource {
    files: HashMap<String, String>,
}

impl MockLogSource {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
        }
    }

    /// Add a file with the given content.
    pub fn add_file(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    /// Take over every file from `other`, replacing same-path entries.
    pub fn merge(&mut self, other: MockLogSource) {
        self.files.extend(other.files);
    }

    /// Create a mock with a sample Symfony/Monolog file.
    pub fn with_monolog_sample() -> Self {
        let mut m = Self::new();
        m.add_file(
            "/var/www/var/log/prod.log",
            [
                r#"[2025-07-03T23:01:41.970023+00:00] doctrine.INFO: Query executed {"sql":"SELECT 1"} []"#,
                r#"[2025-07-03T23:01:42.112000+00:00] request.INFO: Matched route "app_logs". {"route":"app_logs","method":"GET"} []"#,
                r#"[2025-07-03T23:01:42.530411+00:00] security.DEBUG: Checking for authenticator support. {"firewall_name":"main"} []"#,
                r#"[2025-07-03T23:01:43.004100+00:00] app.WARNING: Upload directory is 91% full [] []"#,
                "",
                r#"[2025-07-03T23:01:44.781200+00:00] request.CRITICAL: Uncaught PHP Exception RuntimeException: "Disk full" at /var/www/src/Service/FileUploadService.php line 42 {"exception":"[object] (RuntimeException(code: 0))"} []"#,
                "#0 /var/www/vendor/symfony/http-kernel/HttpKernel.php(163): App\\Controller\\UploadController->upload()",
                r#"[2025-07-03T23:01:45.000000+00:00] php.NOTICE: Undefined index: page {"file":"/var/www/src/Controller/LogsController.php"} []"#,
            ]
            .join("\n"),
        );
        m
    }

    /// Create a mock with a sample nginx access log.
    pub fn with_access_sample() -> Self {
        let mut m = Self::new();
        m.add_file(
            "/var/log/nginx/access.log",
            [
                r#"192.168.1.10 - - [15/Jan/2024:10:30:45 +0000] "GET /logs HTTP/1.1" 200 5321 "-" "Mozilla/5.0""#,
                r#"192.168.1.10 - - [15/Jan/2024:10:30:46 +0000] "POST /upload HTTP/1.1" 302 0 "https://logs.example.com/upload" "Mozilla/5.0""#,
                r#"10.0.0.7 - admin [15/Jan/2024:10:31:02 +0000] "GET /logs/export/csv HTTP/1.1" 500 172 "-" "curl/8.4.0""#,
                r#"10.0.0.7 - - [15/Jan/2024:10:31:05 +0000] "GET /favicon.ico HTTP/1.1" 404 153"#,
            ]
            .join("\n"),
        );
        m
    }

    /// Create a mock with an unstructured application log.
    pub fn with_plaintext_sample() -> Self {
        let mut m = Self::new();
        m.add_file(
            "/var/log/app.log",
            [
                "2024-01-15 10:30:45 INFO Application started",
                "2024-01-15 10:30:46 ERROR Something went wrong",
                "15/01/2024 10:31:00 worker 3 picked up job 881",
                "Jan 15 10:31:07 web01 cron[5678]: (root) CMD (/usr/bin/cleanup)",
                "asdkjalksdj random noise",
                "2024-01-15T10:32:00+00:00 [WARNING] queue depth above threshold",
                "DEBUG cache warmed in 42ms",
            ]
            .join("\n"),
        );
        m
    }
}

impl Default for MockLogSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogSource for MockLogSource {
    async fn read_content(&self, path: &str) -> IngestResult<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| IngestError::NotFound(path.to_string()))
    }

    async fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}
