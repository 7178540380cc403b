//! UseCase: 接続処理
//!
//! サーバー側でセッション ID を採番し、チャンネルを登録して `connected` を返します。
//! レジストリへの登録は `register_name`（または最初のメッセージ）で行われます。

use std::sync::Arc;

use crate::domain::{OutboundEvent, PusherChannel, SessionId};

use super::router::BroadcastRouter;

/// 接続のユースケース
pub struct ConnectSessionUseCase {
    router: Arc<BroadcastRouter>,
}

impl ConnectSessionUseCase {
    pub fn new(router: Arc<BroadcastRouter>) -> Self {
        Self { router }
    }

    /// 接続を受け付け、採番したセッション ID を返す
    pub async fn execute(&self, channel: PusherChannel) -> SessionId {
        let session_id = SessionId::generate();

        self.router
            .register_client(session_id.clone(), channel)
            .await;
        self.router
            .deliver_to_session(
                &session_id,
                OutboundEvent::Connected {
                    session_id: session_id.clone(),
                },
            )
            .await;

        tracing::info!("Session '{}' connected", session_id);
        session_id
    }
}
