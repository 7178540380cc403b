//! UseCase: 会話の要約をメールで送信
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RequestSummaryUseCase::execute()
//! - 要約生成 → 感情分析（任意）→ ドキュメント生成 → メール送信の流れ
//! - summary_status（pending → sent / failed）の通知
//!
//! ### なぜこのテストが必要か
//! - 外部サービスの失敗やタイムアウトが 1 回の failed 通知で終わり、
//!   レジストリやトランスクリプトを変化させないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：すべて成功
//! - 正常系：感情分析だけ失敗（結果なしで続行）
//! - 異常系：不正なメールアドレス、履歴なし、要約失敗、タイムアウト

use std::{collections::HashSet, future::Future, sync::Arc, time::Duration};

use tokio::sync::Mutex;

use crate::domain::{
    Attachment, DisplayName, DocumentRenderer, DocumentRequest, EmailAddress,
    ExternalServiceError, MailReceipt, Mailer, Message, OutboundEvent, OutgoingMail,
    SentimentScorer, SessionId, SessionRepository, Summarizer, SummaryState, TranscriptRepository,
};

use super::{error::RequestSummaryError, router::BroadcastRouter};

/// 要約プロンプトに含める最大メッセージ数
const PROMPT_MESSAGE_LIMIT: usize = 200;
/// ドキュメントに含める最大メッセージ数
const DOCUMENT_MESSAGE_LIMIT: usize = 100;

const SUMMARY_INSTRUCTION: &str = "Briefly summarize the following conversation in at most 6-8 lines. \
Include the key points and any recommendations that apply.";

/// 要約フローが呼び出す外部サービス
#[derive(Clone)]
pub struct SummaryCollaborators {
    pub summarizer: Arc<dyn Summarizer>,
    pub sentiment_scorer: Arc<dyn SentimentScorer>,
    pub document_renderer: Arc<dyn DocumentRenderer>,
    pub mailer: Arc<dyn Mailer>,
}

pub struct RequestSummaryUseCase {
    session_repository: Arc<dyn SessionRepository>,
    transcript_repository: Arc<dyn TranscriptRepository>,
    router: Arc<BroadcastRouter>,
    collaborators: SummaryCollaborators,
    call_timeout: Duration,
    bot_name: String,
    // 要約処理中のセッション（1 セッションにつき同時に 1 件）
    in_flight: Mutex<HashSet<SessionId>>,
}

impl RequestSummaryUseCase {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        transcript_repository: Arc<dyn TranscriptRepository>,
        router: Arc<BroadcastRouter>,
        collaborators: SummaryCollaborators,
        call_timeout: Duration,
        bot_name: String,
    ) -> Self {
        Self {
            session_repository,
            transcript_repository,
            router,
            collaborators,
            call_timeout,
            bot_name,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// 要約を生成してメールで送る
    ///
    /// 外部サービスの呼び出しはロックを保持せずに行われ、それぞれに
    /// `call_timeout` が適用されます。結果は要求元ビジターにだけ通知されます
    /// （すでに切断済みなら何もしない）。
    pub async fn execute(
        &self,
        session_id: SessionId,
        email: String,
    ) -> Result<MailReceipt, RequestSummaryError> {
        let email = match EmailAddress::new(email) {
            Ok(email) => email,
            Err(e) => {
                self.status(&session_id, SummaryState::Failed, "Invalid email address.")
                    .await;
                return Err(RequestSummaryError::InvalidEmail(e));
            }
        };

        if !self.in_flight.lock().await.insert(session_id.clone()) {
            tracing::debug!("Summary for '{}' already in progress", session_id);
            self.status(
                &session_id,
                SummaryState::Pending,
                "A summary is already being prepared.",
            )
            .await;
            return Err(RequestSummaryError::AlreadyPending);
        }

        self.status(
            &session_id,
            SummaryState::Pending,
            "Generating your chat summary...",
        )
        .await;

        let result = self.summarize_and_send(&session_id, email).await;
        self.in_flight.lock().await.remove(&session_id);
        match &result {
            Ok(receipt) => {
                tracing::info!("Summary for '{}' sent (receipt '{}')", session_id, receipt.id);
                self.status(&session_id, SummaryState::Sent, "Summary sent by email.")
                    .await;
            }
            Err(RequestSummaryError::NoHistory) => {
                self.status(
                    &session_id,
                    SummaryState::Failed,
                    "There is no chat history to summarize yet.",
                )
                .await;
            }
            Err(e) => {
                tracing::warn!("Summary for '{}' failed: {}", session_id, e);
                self.status(
                    &session_id,
                    SummaryState::Failed,
                    format!("Could not send the summary: {e}"),
                )
                .await;
            }
        }
        result
    }

    async fn summarize_and_send(
        &self,
        session_id: &SessionId,
        email: EmailAddress,
    ) -> Result<MailReceipt, RequestSummaryError> {
        let history = self.transcript_repository.fetch(session_id).await;
        let prompt_body = prompt_lines(&history);
        if prompt_body.is_empty() {
            return Err(RequestSummaryError::NoHistory);
        }

        // 1. 要約（失敗は致命的）
        let summary = call_with_timeout(
            "summarizer",
            self.call_timeout,
            self.collaborators
                .summarizer
                .generate_summary(format!("{SUMMARY_INSTRUCTION}\n\n{prompt_body}")),
        )
        .await?;

        // 2. 感情分析（失敗しても続行）
        let sentiment = match call_with_timeout(
            "sentiment scorer",
            self.call_timeout,
            self.collaborators
                .sentiment_scorer
                .score_sentiment(summary.clone()),
        )
        .await
        {
            Ok(sentiment) => Some(sentiment),
            Err(e) => {
                tracing::warn!("Continuing without sentiment: {}", e);
                None
            }
        };

        // 3. ドキュメント生成
        let name = self
            .session_repository
            .get(session_id)
            .await
            .map(|session| session.display_name)
            .unwrap_or_else(DisplayName::guest);
        let request = DocumentRequest {
            title: format!("Chat summary - {name}"),
            summary: summary.clone(),
            sentiment,
            transcript: tail(&history, DOCUMENT_MESSAGE_LIMIT).to_vec(),
        };
        let document = call_with_timeout(
            "document renderer",
            self.call_timeout,
            self.collaborators
                .document_renderer
                .render_transcript_document(request),
        )
        .await?;

        // 4. メール送信
        let mail = OutgoingMail {
            to: email,
            subject: format!("Summary of your chat with {}", self.bot_name),
            html_body: format!("<p>Summary:<br>{}</p>", escape_html(&summary)),
            attachment: Attachment {
                filename: "summary.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                bytes: document,
            },
        };
        let receipt = call_with_timeout(
            "mailer",
            self.call_timeout,
            self.collaborators.mailer.send_mail(mail),
        )
        .await?;

        Ok(receipt)
    }

    async fn status(&self, session_id: &SessionId, state: SummaryState, message: impl Into<String>) {
        self.router
            .deliver_to_session(
                session_id,
                OutboundEvent::SummaryStatus {
                    state,
                    message: message.into(),
                },
            )
            .await;
    }
}

async fn call_with_timeout<T>(
    service: &'static str,
    after: Duration,
    call: impl Future<Output = Result<T, ExternalServiceError>>,
) -> Result<T, ExternalServiceError> {
    match tokio::time::timeout(after, call).await {
        Ok(result) => result,
        Err(_) => Err(ExternalServiceError::Timeout { service, after }),
    }
}

fn tail(messages: &[Message], limit: usize) -> &[Message] {
    &messages[messages.len().saturating_sub(limit)..]
}

/// `sender: text` lines for the most recent messages; audio-only messages are skipped
fn prompt_lines(history: &[Message]) -> String {
    tail(history, PROMPT_MESSAGE_LIMIT)
        .iter()
        .filter(|message| !message.text.is_empty())
        .map(|message| format!("{}: {}", message.sender.as_str(), message.text))
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\n' => escaped.push_str("<br>"),
            _ => escaped.push(c),
        }
    }
    escaped
}
