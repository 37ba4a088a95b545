use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// File attached to an outbound email, base64-encoded for the JSON API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailAttachment {
    pub filename: String,
    pub content: String,
    #[serde(rename = "type")]
    pub content_type: String,
}

impl EmailAttachment {
    pub fn pdf(filename: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            filename: filename.into(),
            content: STANDARD.encode(bytes),
            content_type: mime::APPLICATION_PDF.to_string(),
        }
    }

    pub fn decoded_len(&self) -> Option<usize> {
        STANDARD.decode(&self.content).ok().map(|bytes| bytes.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<EmailAttachment>,
}

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("email transport failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("email provider rejected the message (status {status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("email delivery unavailable: {0}")]
    Unavailable(String),
}

/// Outbound email gateway used by the lead forms.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailerError>;
}

/// Sends mail through a Resend-compatible JSON API.
#[derive(Clone)]
pub struct ResendMailer {
    client: Client,
    api_url: String,
    api_key: String,
}

impl ResendMailer {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, MailerError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailerError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&email)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!(subject = %email.subject, recipients = email.to.len(), "email accepted");
            return Ok(());
        }

        let message = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), %message, "email provider rejected message");
        Err(MailerError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
