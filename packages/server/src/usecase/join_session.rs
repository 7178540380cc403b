//! UseCase: トランスクリプトの再送（ビジターの再参加）

use std::sync::Arc;

use crate::domain::{OutboundEvent, SessionId, SessionRepository, TranscriptRepository};

use super::router::BroadcastRouter;

pub struct JoinSessionUseCase {
    session_repository: Arc<dyn SessionRepository>,
    transcript_repository: Arc<dyn TranscriptRepository>,
    router: Arc<BroadcastRouter>,
}

impl JoinSessionUseCase {
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

    /// 呼び出し元に自身の全履歴を送り、件数を返す
    pub async fn execute(&self, session_id: SessionId) -> usize {
        self.session_repository.touch(&session_id).await;

        let messages = self.transcript_repository.fetch(&session_id).await;
        let count = messages.len();
        self.router
            .deliver_to_session(
                &session_id,
                OutboundEvent::ChatHistory {
                    session_id: session_id.clone(),
                    messages,
                },
            )
            .await;

        tracing::debug!("Replayed {} message(s) to '{}'", count, session_id);
        count
    }
}
