//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! Session Registry と Transcript Store は別々の trait として公開しますが、
//! トランスクリプトは所有するセッションと同じ期間だけ存在します
//! （セッション削除時に一緒に破棄される）。

use async_trait::async_trait;

use super::{
    DisplayName, Message, MessageDraft, RepositoryError, Session, SessionId, Timestamp,
};

/// Session Registry
///
/// どの操作も未知の ID に対してはエラーにならず、何もしない（冪等）。
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// セッションを登録、または名前を上書き
    async fn register(&self, session_id: SessionId, display_name: DisplayName) -> Session;

    /// セッションとトランスクリプトを削除。削除した場合は `true`
    async fn remove(&self, session_id: &SessionId) -> bool;

    /// 最終アクティブ時刻を更新
    async fn touch(&self, session_id: &SessionId);

    /// セッションを取得
    async fn get(&self, session_id: &SessionId) -> Option<Session>;

    /// 現在のセッション一覧（作成時刻順）
    async fn list(&self) -> Vec<Session>;

    /// `cutoff` より前から操作のないセッション ID
    async fn idle_since(&self, cutoff: Timestamp) -> Vec<SessionId>;

    /// `cutoff` より前から操作がない場合に限り削除。削除した場合は `true`
    ///
    /// 判定と削除は同じロックの中で行う（`idle_since` の後に touch された
    /// セッションは残る）。
    async fn remove_if_idle(&self, session_id: &SessionId, cutoff: Timestamp) -> bool;
}

/// Transcript Store
#[async_trait]
pub trait TranscriptRepository: Send + Sync {
    /// メッセージを追加し、ID・タイムスタンプ確定済みのメッセージを返す
    ///
    /// セッションが存在しない場合は `RepositoryError::SessionNotFound`
    async fn append(
        &self,
        session_id: &SessionId,
        draft: MessageDraft,
    ) -> Result<Message, RepositoryError>;

    /// 全履歴を追加順に取得（未知の ID は空）
    async fn fetch(&self, session_id: &SessionId) -> Vec<Message>;
}
