//! UseCase: Admin View Sync
//!
//! セッション一覧を毎回レジストリから作り直し、全オペレーターへ送信します。
//! 差分は計算しません。

use std::sync::Arc;

use crate::domain::{OutboundEvent, SessionRepository, SessionSummary};

use super::router::BroadcastRouter;

pub struct AdminSyncUseCase {
    session_repository: Arc<dyn SessionRepository>,
    router: Arc<BroadcastRouter>,
}

impl AdminSyncUseCase {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        router: Arc<BroadcastRouter>,
    ) -> Self {
        Self {
            session_repository,
            router,
        }
    }

    /// 現在のセッション一覧を送信し、送信した一覧を返す
    pub async fn execute(&self) -> Vec<SessionSummary> {
        let sessions: Vec<SessionSummary> = self
            .session_repository
            .list()
            .await
            .iter()
            .map(SessionSummary::from)
            .collect();

        let delivered = self
            .router
            .deliver_to_operators(OutboundEvent::SessionList(sessions.clone()))
            .await;
        tracing::debug!(
            "Synced {} session(s) to {} operator(s)",
            sessions.len(),
            delivered
        );

        sessions
    }
}
