//! Narrow interfaces to the external collaborators used by the summary flow.
//!
//! None of these are implemented by the core. Every call is made outside any
//! registry lock and wrapped in a timeout by the caller.

use async_trait::async_trait;

use super::{EmailAddress, ExternalServiceError, Message};

/// Advisory sentiment result, kept as the structured value the scorer returned
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentResult(pub serde_json::Value);

/// Input to [`DocumentRenderer::render_transcript_document`]
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRequest {
    pub title: String,
    pub summary: String,
    pub sentiment: Option<SentimentResult>,
    pub transcript: Vec<Message>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: EmailAddress,
    pub subject: String,
    pub html_body: String,
    pub attachment: Attachment,
}

/// Delivery receipt returned by the mail service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailReceipt {
    pub id: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn generate_summary(&self, prompt: String) -> Result<String, ExternalServiceError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SentimentScorer: Send + Sync {
    async fn score_sentiment(&self, text: String) -> Result<SentimentResult, ExternalServiceError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    async fn render_transcript_document(
        &self,
        request: DocumentRequest,
    ) -> Result<Vec<u8>, ExternalServiceError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_mail(&self, mail: OutgoingMail) -> Result<MailReceipt, ExternalServiceError>;
}
