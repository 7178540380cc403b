//! UseCase: 切断処理
//!
//! チャンネルを閉じ、レジストリからセッションとトランスクリプトを削除します。
//! 実際に削除した場合だけ Admin Sync を実行します（名前未登録の接続や
//! リーパーが先に削除した接続では一覧は変化しない）。

use std::sync::Arc;

use crate::domain::{SessionId, SessionRepository};

use super::{admin_sync::AdminSyncUseCase, router::BroadcastRouter};

pub struct DisconnectSessionUseCase {
    session_repository: Arc<dyn SessionRepository>,
    router: Arc<BroadcastRouter>,
    admin_sync: Arc<AdminSyncUseCase>,
}

impl DisconnectSessionUseCase {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        router: Arc<BroadcastRouter>,
        admin_sync: Arc<AdminSyncUseCase>,
    ) -> Self {
        Self {
            session_repository,
            router,
            admin_sync,
        }
    }

    /// 切断を処理し、レジストリから削除したかどうかを返す
    pub async fn execute(&self, session_id: SessionId) -> bool {
        self.router.unregister_client(&session_id).await;

        let removed = self.session_repository.remove(&session_id).await;
        if removed {
            tracing::info!("Session '{}' removed from registry", session_id);
            self.admin_sync.execute().await;
        } else {
            tracing::debug!("Session '{}' was not registered", session_id);
        }
        removed
    }
}
