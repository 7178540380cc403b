//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - オペレーター購読者の集合を管理
//! - `OutboundEvent` を JSON フレームにエンコードして送信
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された sender を受け取り、送信にだけ使用します。
//! クライアントとオペレーター集合は同じ Mutex で守られるため、
//! 登録解除と同時に購読も外れ、閉じたチャンネルへの送信は起こりません。

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{MessagePushError, MessagePusher, OutboundEvent, PusherChannel, SessionId},
    infrastructure::dto::websocket::ServerEvent,
};

#[derive(Default)]
struct Channels {
    clients: HashMap<SessionId, PusherChannel>,
    operators: HashSet<SessionId>,
}

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// pusher.register_client(session_id.clone(), tx).await;
/// pusher.push_to(&session_id, &OutboundEvent::Connected { session_id }).await?;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    channels: Arc<Mutex<Channels>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 現在のオペレーター購読者数
    pub async fn operator_count(&self) -> usize {
        self.channels.lock().await.operators.len()
    }
}

fn encode(event: &OutboundEvent) -> Result<String, MessagePushError> {
    serde_json::to_string(&ServerEvent::from(event))
        .map_err(|e| MessagePushError::Encode(e.to_string()))
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, session_id: SessionId, sender: PusherChannel) {
        let mut channels = self.channels.lock().await;
        tracing::debug!("Session '{}' registered to MessagePusher", session_id);
        channels.clients.insert(session_id, sender);
    }

    async fn unregister_client(&self, session_id: &SessionId) {
        let mut channels = self.channels.lock().await;
        channels.clients.remove(session_id);
        channels.operators.remove(session_id);
        tracing::debug!("Session '{}' unregistered from MessagePusher", session_id);
    }

    async fn push_to(
        &self,
        session_id: &SessionId,
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError> {
        let frame = encode(event)?;
        let channels = self.channels.lock().await;

        let sender = channels
            .clients
            .get(session_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(session_id.as_str().to_string()))?;
        sender
            .send(frame)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed '{}' to session '{}'", event.name(), session_id);
        Ok(())
    }

    async fn subscribe_operator(&self, session_id: &SessionId) -> Result<(), MessagePushError> {
        let mut channels = self.channels.lock().await;
        if !channels.clients.contains_key(session_id) {
            return Err(MessagePushError::ClientNotFound(
                session_id.as_str().to_string(),
            ));
        }
        channels.operators.insert(session_id.clone());
        tracing::debug!("Session '{}' subscribed as operator", session_id);
        Ok(())
    }

    async fn push_to_operators(&self, event: &OutboundEvent) -> Result<usize, MessagePushError> {
        let frame = encode(event)?;
        let channels = self.channels.lock().await;

        let mut delivered = 0;
        for operator in &channels.operators {
            let Some(sender) = channels.clients.get(operator) else {
                tracing::warn!("Operator '{}' has no channel, skipping", operator);
                continue;
            };
            // オペレーターへの送信では一部の失敗を許容
            match sender.send(frame.clone()) {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!(
                    "Failed to push '{}' to operator '{}': {}",
                    event.name(),
                    operator,
                    e
                ),
            }
        }

        tracing::debug!("Pushed '{}' to {} operator(s)", event.name(), delivered);
        Ok(delivered)
    }
}
