//! UseCase: オペレーター購読
//!
//! 購読後に Admin Sync を実行し、新しいオペレーターにも現在の一覧を届けます。

use std::sync::Arc;

use crate::domain::{SessionId, SessionSummary};

use super::{
    admin_sync::AdminSyncUseCase, error::SubscribeOperatorError, router::BroadcastRouter,
};

pub struct SubscribeOperatorUseCase {
    router: Arc<BroadcastRouter>,
    admin_sync: Arc<AdminSyncUseCase>,
}

impl SubscribeOperatorUseCase {
    pub fn new(router: Arc<BroadcastRouter>, admin_sync: Arc<AdminSyncUseCase>) -> Self {
        Self { router, admin_sync }
    }

    pub async fn execute(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<SessionSummary>, SubscribeOperatorError> {
        if !self.router.subscribe_operator(&session_id).await {
            return Err(SubscribeOperatorError::ChannelNotFound(
                session_id.into_string(),
            ));
        }
        tracing::info!("Operator '{}' subscribed", session_id);

        Ok(self.admin_sync.execute().await)
    }
}
