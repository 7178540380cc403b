//! MessagePusher trait 定義
//!
//! 接続チャンネルへのイベント送信を抽象化します。
//! WebSocket などの具体的な実装は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{MessagePushError, OutboundEvent, SessionId};

/// 1 接続分の送信チャンネル（エンコード済みフレーム）
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続チャンネルを登録
    async fn register_client(&self, session_id: SessionId, sender: PusherChannel);

    /// 接続チャンネルの登録を解除（オペレーター購読も解除される）
    async fn unregister_client(&self, session_id: &SessionId);

    /// 特定の 1 チャンネルへ送信
    async fn push_to(
        &self,
        session_id: &SessionId,
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError>;

    /// チャンネルをオペレーター購読者に追加
    async fn subscribe_operator(&self, session_id: &SessionId) -> Result<(), MessagePushError>;

    /// 購読中の全オペレーターへ送信し、送信できた数を返す
    ///
    /// 一部の送信失敗は許容される。
    async fn push_to_operators(&self, event: &OutboundEvent) -> Result<usize, MessagePushError>;
}
