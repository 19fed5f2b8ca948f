use crate::domain::ports::ReportSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Reads an export that was already downloaded to disk.
#[derive(Debug, Clone)]
pub struct FileReportSource {
    path: PathBuf,
}

impl FileReportSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ReportSource for FileReportSource {
    async fn fetch(&self) -> Result<String> {
        tracing::debug!("Reading attendance export from {}", self.path.display());
        let body = tokio::fs::read_to_string(&self.path).await?;
        Ok(body)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EtlError;

    #[tokio::test]
    async fn test_fetch_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");
        std::fs::write(&path, "Lithium ID\nLI-1\n").unwrap();

        let body = FileReportSource::new(&path).fetch().await.unwrap();
        assert_eq!(body, "Lithium ID\nLI-1\n");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileReportSource::new(dir.path().join("nope.csv"));
        assert!(matches!(source.fetch().await, Err(EtlError::IoError(_))));
    }
}
