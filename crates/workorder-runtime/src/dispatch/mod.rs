//! Report distribution
//!
//! Every sink gets the same finished document. Sinks run concurrently and
//! independently: one failing sink never affects the others, and nothing is
//! retried or rolled back.

mod download;
mod http;
mod share;

pub use download::DownloadSink;
pub use http::{EmailSink, NasUploadSink};
pub use share::ShareSink;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::future::join_all;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use workorder_core::WorkOrder;
use workorder_report::{AssembledReport, report_file_name};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("HTTP status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("Command failed: {0}")]
    Command(String),
    #[error("Not supported: {0}")]
    Unsupported(String),
}

impl From<std::io::Error> for SinkError {
    fn from(e: std::io::Error) -> Self {
        SinkError::Io(e.to_string())
    }
}

impl From<reqwest::Error> for SinkError {
    fn from(e: reqwest::Error) -> Self {
        SinkError::Http(e.to_string())
    }
}

/// What a sink did with the document
#[derive(Debug, Clone, PartialEq)]
pub struct SinkReceipt {
    pub detail: String,
}

/// Result of one sink
#[derive(Debug, Clone)]
pub struct SinkOutcome {
    pub sink: String,
    pub result: Result<SinkReceipt, SinkError>,
}

impl SinkOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

impl fmt::Display for SinkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            Ok(receipt) => write!(f, "{}: {}", self.sink, receipt.detail),
            Err(e) => write!(f, "{}: failed: {}", self.sink, e),
        }
    }
}

/// A finished report ready to be handed out
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub file_name: String,
    /// Short title, used as share title and mail subject
    pub title: String,
    /// Plain text description of the order
    pub summary: String,
    pub bytes: Bytes,
}

impl ReportDocument {
    pub fn new(order: &WorkOrder, report: &AssembledReport) -> Self {
        let date = order.date_time().format("%Y-%m-%d").to_string();
        let title = if order.service_unit().trim().is_empty() {
            format!("Work order {}", date)
        } else {
            format!("Work order {} {}", order.service_unit().trim(), date)
        };

        let mut summary = format!(
            "Work order for {}\nDate: {}\nContact: {} {}\nPages: {}\n",
            order.service_unit(),
            order.date_time().format("%Y-%m-%d %H:%M"),
            order.contact_person(),
            order.contact_phone(),
            report.page_count(),
        );
        if report.is_partial() {
            let missing: Vec<String> = report
                .skipped
                .iter()
                .map(|e| e.page_number.to_string())
                .collect();
            summary.push_str(&format!(
                "Note: page(s) {} could not be included.\n",
                missing.join(", ")
            ));
        }

        Self {
            file_name: report_file_name(order),
            title,
            summary,
            bytes: Bytes::from(report.bytes.clone()),
        }
    }
}

/// A destination for finished reports
#[async_trait]
pub trait ReportSink: Send + Sync + fmt::Debug {
    /// Name used in outcomes and logs
    fn name(&self) -> &str;

    async fn deliver(&self, document: &ReportDocument) -> Result<SinkReceipt, SinkError>;
}

/// Hand `document` to every sink concurrently.
///
/// Outcomes come back in the order of `sinks`.
pub async fn dispatch(document: &ReportDocument, sinks: &[Arc<dyn ReportSink>]) -> Vec<SinkOutcome> {
    let deliveries = sinks.iter().map(|sink| async move {
        let result = sink.deliver(document).await;
        match &result {
            Ok(receipt) => log::info!("{}: {}", sink.name(), receipt.detail),
            Err(e) => log::warn!("{} failed: {}", sink.name(), e),
        }
        SinkOutcome {
            sink: sink.name().to_string(),
            result,
        }
    });
    join_all(deliveries).await
}
