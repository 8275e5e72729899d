use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use workorder_report::{ReportError, ReportOptions};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid report options: {0}")]
    Report(#[from] ReportError),
}

/// Application configuration, stored as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub report: ReportOptions,
    pub drafts_dir: PathBuf,
    pub download_dir: PathBuf,
    pub nas_endpoint: Option<String>,
    pub email_endpoint: Option<String>,
    pub email_recipient: Option<String>,
    pub share_command: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            report: ReportOptions::default(),
            drafts_dir: PathBuf::from("drafts"),
            download_dir: PathBuf::from("."),
            nas_endpoint: None,
            email_endpoint: None,
            email_recipient: None,
            share_command: None,
        }
    }
}

impl AppConfig {
    /// Load and validate a config file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let bytes = tokio::fs::read(path).await?;
        let config: AppConfig = serde_json::from_slice(&bytes)?;
        config.report.validate()?;
        Ok(config)
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}
