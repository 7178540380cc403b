//! UseCase: オペレーターからの返信
//!
//! 返信は `Admin` を送信者として対象セッションのトランスクリプトに保存され、
//! 対象ビジターのチャンネルにだけ届きます。切断済みのセッション宛ての返信は
//! 破棄され（トランスクリプトはセッションと同時に消えている）、配送も行いません。

use std::sync::Arc;

use crate::domain::{
    Message, MessageDraft, MessageId, MessageText, NoticeKind, OutboundEvent, RepositoryError,
    Sender, SessionId, SessionRepository, Timestamp, TranscriptRepository,
};

use super::{error::OperatorMessageError, router::BroadcastRouter};

/// オペレーターから届いた返信（未検証）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperatorReply {
    pub session_id: String,
    pub text: String,
    pub message_id: Option<String>,
    pub timestamp: Option<String>,
}

pub struct OperatorMessageUseCase {
    session_repository: Arc<dyn SessionRepository>,
    transcript_repository: Arc<dyn TranscriptRepository>,
    router: Arc<BroadcastRouter>,
}

impl OperatorMessageUseCase {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        transcript_repository: Arc<dyn TranscriptRepository>,
        router: Arc<BroadcastRouter>,
    ) -> Self {
        Self {
            session_repository,
            transcript_repository,
            router,
        }
    }

    pub async fn execute(
        &self,
        operator_id: SessionId,
        reply: OperatorReply,
    ) -> Result<Message, OperatorMessageError> {
        let target = match SessionId::new(reply.session_id) {
            Ok(id) => id,
            Err(e) => {
                self.router
                    .notify(&operator_id, NoticeKind::Validation, e.to_string())
                    .await;
                return Err(OperatorMessageError::InvalidSessionId(e));
            }
        };
        let text = match MessageText::new(reply.text) {
            Ok(text) => text,
            Err(e) => {
                self.router
                    .notify(&operator_id, NoticeKind::Validation, e.to_string())
                    .await;
                return Err(OperatorMessageError::InvalidText(e));
            }
        };

        if self.session_repository.get(&target).await.is_none() {
            tracing::warn!(
                "Operator '{}' replied to unknown session '{}', dropping",
                operator_id,
                target
            );
            return Err(OperatorMessageError::SessionNotFound(target.into_string()));
        }

        let draft = MessageDraft::text(text, Sender::Admin)
            .with_message_id(reply.message_id.and_then(|id| MessageId::new(id).ok()))
            .with_timestamp(reply.timestamp.as_deref().and_then(Timestamp::parse));

        // get と append の間に切断された場合もここで破棄される
        let message = match self.transcript_repository.append(&target, draft).await {
            Ok(message) => message,
            Err(RepositoryError::SessionNotFound(id)) => {
                tracing::warn!("Session '{}' left before the reply was stored, dropping", id);
                return Err(OperatorMessageError::SessionNotFound(id));
            }
        };

        self.router
            .deliver_to_session(&target, OutboundEvent::Message(message.clone()))
            .await;
        Ok(message)
    }
}
