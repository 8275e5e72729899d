use super::{ReportDocument, ReportSink, SinkError, SinkReceipt};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use serde::Serialize;

fn client() -> Result<Client, SinkError> {
    Client::builder()
        .user_agent(concat!("workorder/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| SinkError::Http(format!("Failed to create HTTP client: {}", e)))
}

fn check_status(response: &reqwest::Response, url: &str) -> Result<(), SinkError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(SinkError::Status {
            status: response.status().as_u16(),
            url: url.to_string(),
        })
    }
}

/// Uploads the PDF to a network storage endpoint
#[derive(Debug, Clone)]
pub struct NasUploadSink {
    endpoint: String,
    client: Client,
}

impl NasUploadSink {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, SinkError> {
        Ok(Self {
            endpoint: endpoint.into(),
            client: client()?,
        })
    }
}

#[async_trait]
impl ReportSink for NasUploadSink {
    fn name(&self) -> &str {
        "nas"
    }

    async fn deliver(&self, document: &ReportDocument) -> Result<SinkReceipt, SinkError> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("filename", document.file_name.as_str())])
            .header(reqwest::header::CONTENT_TYPE, "application/pdf")
            .body(document.bytes.clone())
            .send()
            .await?;
        check_status(&response, &self.endpoint)?;

        Ok(SinkReceipt {
            detail: format!("uploaded {} to {}", document.file_name, self.endpoint),
        })
    }
}

#[derive(Debug, Serialize)]
struct EmailAttachment<'a> {
    filename: &'a str,
    content_type: &'a str,
    data_base64: String,
}

#[derive(Debug, Serialize)]
struct EmailRequest<'a> {
    to: &'a str,
    subject: &'a str,
    body: &'a str,
    attachment: EmailAttachment<'a>,
}

/// Sends the PDF as a mail attachment through an HTTP mail relay
#[derive(Debug, Clone)]
pub struct EmailSink {
    endpoint: String,
    recipient: String,
    client: Client,
}

impl EmailSink {
    pub fn new(endpoint: impl Into<String>, recipient: impl Into<String>) -> Result<Self, SinkError> {
        Ok(Self {
            endpoint: endpoint.into(),
            recipient: recipient.into(),
            client: client()?,
        })
    }

    fn request<'a>(&'a self, document: &'a ReportDocument) -> EmailRequest<'a> {
        EmailRequest {
            to: &self.recipient,
            subject: &document.title,
            body: &document.summary,
            attachment: EmailAttachment {
                filename: &document.file_name,
                content_type: "application/pdf",
                data_base64: STANDARD.encode(&document.bytes),
            },
        }
    }
}

#[async_trait]
impl ReportSink for EmailSink {
    fn name(&self) -> &str {
        "email"
    }

    async fn deliver(&self, document: &ReportDocument) -> Result<SinkReceipt, SinkError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&self.request(document))
            .send()
            .await?;
        check_status(&response, &self.endpoint)?;

        Ok(SinkReceipt {
            detail: format!("mailed {} to {}", document.file_name, self.recipient),
        })
    }
}
