use super::{ReportDocument, ReportSink, SinkError, SinkReceipt};
use async_trait::async_trait;
use tokio::process::Command;

/// Hands the document to a platform share command.
///
/// The command line is split on whitespace; the PDF path, title and summary
/// are appended as the last three arguments. The PDF lives in a private
/// temporary directory that is removed once the command exits, so the
/// command must be done with the file by then.
#[derive(Debug, Clone, Default)]
pub struct ShareSink {
    command: Option<String>,
}

impl ShareSink {
    pub fn new(command: Option<String>) -> Self {
        Self { command }
    }
}

#[async_trait]
impl ReportSink for ShareSink {
    fn name(&self) -> &str {
        "share"
    }

    async fn deliver(&self, document: &ReportDocument) -> Result<SinkReceipt, SinkError> {
        let mut parts = self
            .command
            .as_deref()
            .unwrap_or_default()
            .split_whitespace();
        let Some(program) = parts.next() else {
            return Err(SinkError::Unsupported(
                "no share command configured".to_string(),
            ));
        };

        let staging = tempfile::Builder::new()
            .prefix("workorder-share-")
            .tempdir()?;
        let path = staging.path().join(&document.file_name);
        tokio::fs::write(&path, &document.bytes).await?;

        let output = Command::new(program)
            .args(parts)
            .arg(&path)
            .arg(&document.title)
            .arg(&document.summary)
            .output()
            .await
            .map_err(|e| SinkError::Command(format!("Failed to run {}: {}", program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SinkError::Command(format!(
                "{} exited with {}: {}",
                program,
                output.status,
                stderr.trim()
            )));
        }

        staging.close()?;
        Ok(SinkReceipt {
            detail: format!("shared {}", path.display()),
        })
    }
}
