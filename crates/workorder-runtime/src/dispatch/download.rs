use super::{ReportDocument, ReportSink, SinkError, SinkReceipt};
use async_trait::async_trait;
use std::path::PathBuf;

/// Saves the document into a local directory
#[derive(Debug, Clone)]
pub struct DownloadSink {
    dir: PathBuf,
}

impl DownloadSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl ReportSink for DownloadSink {
    fn name(&self) -> &str {
        "download"
    }

    async fn deliver(&self, document: &ReportDocument) -> Result<SinkReceipt, SinkError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(&document.file_name);
        tokio::fs::write(&path, &document.bytes).await?;
        Ok(SinkReceipt {
            detail: format!("saved to {}", path.display()),
        })
    }
}
