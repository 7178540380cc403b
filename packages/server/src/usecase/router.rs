//! Broadcast Router
//!
//! `MessagePusher` の上に置かれる配送ルール。送信の失敗はここでログに記録して
//! 吸収し、呼び出し元のユースケースにエラーとして返しません。

use std::sync::Arc;

use crate::domain::{
    Message, MessagePusher, NoticeKind, OutboundEvent, PusherChannel, SessionId,
};

pub struct BroadcastRouter {
    message_pusher: Arc<dyn MessagePusher>,
}

impl BroadcastRouter {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    pub async fn register_client(&self, session_id: SessionId, channel: PusherChannel) {
        self.message_pusher.register_client(session_id, channel).await;
    }

    /// チャンネルを閉じる（オペレーター購読も外れる）
    pub async fn unregister_client(&self, session_id: &SessionId) {
        self.message_pusher.unregister_client(session_id).await;
    }

    pub async fn subscribe_operator(&self, session_id: &SessionId) -> bool {
        match self.message_pusher.subscribe_operator(session_id).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to subscribe operator '{}': {}", session_id, e);
                false
            }
        }
    }

    /// 1 つのチャンネルへ送信。届かなかった場合は `false`
    pub async fn deliver_to_session(&self, session_id: &SessionId, event: OutboundEvent) -> bool {
        match self.message_pusher.push_to(session_id, &event).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    "Dropped '{}' for session '{}': {}",
                    event.name(),
                    session_id,
                    e
                );
                false
            }
        }
    }

    /// 購読中の全オペレーターへ送信し、届いた数を返す
    pub async fn deliver_to_operators(&self, event: OutboundEvent) -> usize {
        match self.message_pusher.push_to_operators(&event).await {
            Ok(delivered) => delivered,
            Err(e) => {
                tracing::warn!("Dropped '{}' for operators: {}", event.name(), e);
                0
            }
        }
    }

    /// ビジター側のメッセージをセッション ID 付きでオペレーターへ中継
    pub async fn relay_to_operators(&self, session_id: &SessionId, message: Message) -> usize {
        self.deliver_to_operators(OutboundEvent::Relay {
            session_id: session_id.clone(),
            message,
        })
        .await
    }

    /// 要求元チャンネルだけに届くローカル通知
    pub async fn notify(&self, session_id: &SessionId, kind: NoticeKind, text: impl Into<String>) {
        self.deliver_to_session(
            session_id,
            OutboundEvent::Notice {
                kind,
                text: text.into(),
            },
        )
        .await;
    }
}
