//! UseCase: オペレーターによるセッション選択（トランスクリプト取得）

use std::sync::Arc;

use crate::domain::{NoticeKind, OutboundEvent, SessionId, TranscriptRepository};

use super::{error::SelectSessionError, router::BroadcastRouter};

pub struct SelectSessionUseCase {
    transcript_repository: Arc<dyn TranscriptRepository>,
    router: Arc<BroadcastRouter>,
}

impl SelectSessionUseCase {
    pub fn new(
        transcript_repository: Arc<dyn TranscriptRepository>,
        router: Arc<BroadcastRouter>,
    ) -> Self {
        Self {
            transcript_repository,
            router,
        }
    }

    /// `target` のトランスクリプトを要求元オペレーターに送る
    ///
    /// 未知のセッションは空の履歴になる。
    pub async fn execute(
        &self,
        operator_id: SessionId,
        target: String,
    ) -> Result<usize, SelectSessionError> {
        let target = match SessionId::new(target) {
            Ok(id) => id,
            Err(e) => {
                self.router
                    .notify(&operator_id, NoticeKind::Validation, e.to_string())
                    .await;
                return Err(SelectSessionError::InvalidSessionId(e));
            }
        };

        let messages = self.transcript_repository.fetch(&target).await;
        let count = messages.len();
        self.router
            .deliver_to_session(
                &operator_id,
                OutboundEvent::ChatHistory {
                    session_id: target,
                    messages,
                },
            )
            .await;
        Ok(count)
    }
}
