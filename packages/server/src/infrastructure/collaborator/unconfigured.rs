//! Placeholders used when no external service is wired in.
//!
//! Each one fails with [`ExternalServiceError::NotConfigured`], so a summary
//! request ends with `summary_status failed` instead of hanging.

use async_trait::async_trait;

use crate::domain::{
    DocumentRenderer, DocumentRequest, ExternalServiceError, MailReceipt, Mailer, OutgoingMail,
    SentimentResult, SentimentScorer, Summarizer,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredSummarizer;

#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredSentimentScorer;

#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredDocumentRenderer;

#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredMailer;

#[async_trait]
impl Summarizer for UnconfiguredSummarizer {
    async fn generate_summary(&self, _prompt: String) -> Result<String, ExternalServiceError> {
        Err(ExternalServiceError::NotConfigured {
            service: "summarizer",
        })
    }
}

#[async_trait]
impl SentimentScorer for UnconfiguredSentimentScorer {
    async fn score_sentiment(&self, _text: String) -> Result<SentimentResult, ExternalServiceError> {
        Err(ExternalServiceError::NotConfigured {
            service: "sentiment scorer",
        })
    }
}

#[async_trait]
impl DocumentRenderer for UnconfiguredDocumentRenderer {
    async fn render_transcript_document(
        &self,
        _request: DocumentRequest,
    ) -> Result<Vec<u8>, ExternalServiceError> {
        Err(ExternalServiceError::NotConfigured {
            service: "document renderer",
        })
    }
}

#[async_trait]
impl Mailer for UnconfiguredMailer {
    async fn send_mail(&self, _mail: OutgoingMail) -> Result<MailReceipt, ExternalServiceError> {
        Err(ExternalServiceError::NotConfigured { service: "mailer" })
    }
}
