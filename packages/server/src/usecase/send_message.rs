//! UseCase: ビジターのメッセージ送信
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute()
//! - 保存、ビジターへのエコー、オペレーターへの中継、"menu" ショートカット
//!
//! ### なぜこのテストが必要か
//! - ルーティング規則の中心であり、エコーと中継の片方が欠けると会話が見えなくなる
//! - 名前未登録のビジターのメッセージがトランスクリプトから漏れないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：通常メッセージ、"menu"（Scenario B）
//! - 正常系：名前登録前のメッセージ（Guest として暗黙登録）
//! - 異常系：空メッセージ

use std::{collections::BTreeMap, sync::Arc};

use genkan_shared::time::Clock;

use crate::domain::{
    DisplayName, Message, MessageDraft, MessageId, MessageText, MenuTree, NoticeKind,
    OutboundEvent, RepositoryError, Sender, SessionId, SessionRepository, Timestamp,
    TranscriptRepository,
};

use super::{admin_sync::AdminSyncUseCase, error::SendMessageError, router::BroadcastRouter};

/// ビジターから届いたメッセージ（未検証）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncomingMessage {
    pub text: String,
    pub timestamp: Option<String>,
    pub message_id: Option<String>,
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl IncomingMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    session_repository: Arc<dyn SessionRepository>,
    transcript_repository: Arc<dyn TranscriptRepository>,
    router: Arc<BroadcastRouter>,
    admin_sync: Arc<AdminSyncUseCase>,
    menu: Arc<MenuTree>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        transcript_repository: Arc<dyn TranscriptRepository>,
        router: Arc<BroadcastRouter>,
        admin_sync: Arc<AdminSyncUseCase>,
        menu: Arc<MenuTree>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            session_repository,
            transcript_repository,
            router,
            admin_sync,
            menu,
            clock,
        }
    }

    /// メッセージを保存し、ビジターにエコー、オペレーターに中継する
    ///
    /// # Returns
    ///
    /// * `Ok(Message)` - ID とタイムスタンプが確定した保存済みメッセージ
    /// * `Err(SendMessageError)` - 検証失敗（validation notice 送信済み）
    pub async fn execute(
        &self,
        session_id: SessionId,
        incoming: IncomingMessage,
    ) -> Result<Message, SendMessageError> {
        let text = match MessageText::new(incoming.text) {
            Ok(text) => text,
            Err(e) => {
                self.router
                    .notify(&session_id, NoticeKind::Validation, e.to_string())
                    .await;
                return Err(SendMessageError::InvalidText(e));
            }
        };
        let opens_menu = text.is_menu_command();

        // 1. 名前未登録なら Guest として登録
        let display_name = self.ensure_registered(&session_id).await;

        // 2. トランスクリプトに保存
        let draft = MessageDraft::text(text, Sender::Visitor(display_name.clone()))
            .with_message_id(incoming.message_id.and_then(|id| MessageId::new(id).ok()))
            .with_timestamp(incoming.timestamp.as_deref().and_then(Timestamp::parse))
            .with_extra(incoming.extra);

        let message = self
            .transcript_repository
            .append(&session_id, draft)
            .await
            .map_err(|e| match e {
                RepositoryError::SessionNotFound(id) => SendMessageError::SessionNotFound(id),
            })?;

        // 3. エコーと中継
        self.router
            .deliver_to_session(&session_id, OutboundEvent::Message(message.clone()))
            .await;
        self.router
            .relay_to_operators(&session_id, message.clone())
            .await;

        // 4. "menu" ショートカット
        if opens_menu {
            self.router
                .deliver_to_session(
                    &session_id,
                    OutboundEvent::ShowMenu(self.menu.lookup_top_level()),
                )
                .await;
            let notice = Message::system_notice(
                format!("{display_name} opened the menu"),
                Timestamp::new(self.clock.now_utc()),
            );
            self.router.relay_to_operators(&session_id, notice).await;
        }

        Ok(message)
    }

    async fn ensure_registered(&self, session_id: &SessionId) -> DisplayName {
        if let Some(session) = self.session_repository.get(session_id).await {
            self.session_repository.touch(session_id).await;
            return session.display_name;
        }

        tracing::info!(
            "Session '{}' sent a message before registering, registering as guest",
            session_id
        );
        let session = self
            .session_repository
            .register(session_id.clone(), DisplayName::guest())
            .await;
        self.admin_sync.execute().await;
        session.display_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{Harness, sid};

    fn create_usecase(harness: &Harness) -> SendMessageUseCase {
        SendMessageUseCase::new(
            harness.store.clone(),
            harness.store.clone(),
            harness.router.clone(),
            harness.admin_sync.clone(),
            harness.menu.clone(),
            harness.clock.clone(),
        )
    }

    #[tokio::test]
    async fn test_message_is_echoed_and_relayed() {
        // テスト項目: メッセージは保存され、本人にエコー、オペレーターに中継される
        // given (前提条件):
        let harness = Harness::new();
        let usecase = create_usecase(&harness);
        let mut visitor = harness.connect_visitor("s1", "Ana").await;
        let mut other = harness.connect_visitor("s2", "Luis").await;
        let mut operator = harness.connect_operator("op").await;

        // when (操作):
        let message = usecase
            .execute(sid("s1"), IncomingMessage::text("  hola  "))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(message.text, "hola");
        assert_eq!(message.sender.as_str(), "Ana");

        let echo = visitor.drain();
        assert_eq!(echo.len(), 1);
        assert_eq!(echo[0]["type"], "message");
        assert_eq!(echo[0]["message"]["message_id"], message.message_id.as_str());

        let relayed = operator.drain();
        assert_eq!(relayed.len(), 1);
        assert_eq!(relayed[0]["type"], "message_admin");
        assert_eq!(relayed[0]["session_id"], "s1");

        assert!(other.drain().is_empty());
    }

    #[tokio::test]
    async fn test_client_supplied_id_and_timestamp_are_kept() {
        // テスト項目: クライアント指定の message_id と timestamp が保持される
        // given (前提条件):
        let harness = Harness::new();
        let usecase = create_usecase(&harness);
        let _visitor = harness.connect_visitor("s1", "Ana").await;
        let incoming = IncomingMessage {
            text: "hola".to_string(),
            timestamp: Some("2025-01-01T09:30:00.750+09:00".to_string()),
            message_id: Some("client-1".to_string()),
            extra: BTreeMap::from([("lang".to_string(), serde_json::json!("es"))]),
        };

        // when (操作):
        let message = usecase.execute(sid("s1"), incoming).await.unwrap();

        // then (期待する結果):
        assert_eq!(message.message_id.as_str(), "client-1");
        assert_eq!(message.timestamp.to_rfc3339(), "2025-01-01T00:30:00+00:00");
        assert_eq!(message.extra.get("lang"), Some(&serde_json::json!("es")));
    }

    #[tokio::test]
    async fn test_extra_fields_cannot_override_sender_or_id() {
        // テスト項目: extra に sender / message_id を入れても送信者と ID は変わらない
        // given (前提条件):
        let harness = Harness::new();
        let usecase = create_usecase(&harness);
        let mut visitor = harness.connect_visitor("s1", "Ana").await;
        let mut operator = harness.connect_operator("op").await;
        let incoming = IncomingMessage {
            text: "refund approved".to_string(),
            timestamp: None,
            message_id: None,
            extra: BTreeMap::from([
                ("sender".to_string(), serde_json::json!("Admin")),
                ("message_id".to_string(), serde_json::json!("forged")),
                ("lang".to_string(), serde_json::json!("es")),
            ]),
        };

        // when (操作):
        let message = usecase.execute(sid("s1"), incoming).await.unwrap();

        // then (期待する結果):
        assert_eq!(message.sender.as_str(), "Ana");
        assert_ne!(message.message_id.as_str(), "forged");
        assert!(!message.extra.contains_key("sender"));
        assert!(!message.extra.contains_key("message_id"));
        assert_eq!(message.extra.get("lang"), Some(&serde_json::json!("es")));

        let echo = visitor.drain();
        assert_eq!(echo[0]["message"]["sender"], "Ana");
        assert_eq!(echo[0]["message"]["message_id"], message.message_id.as_str());

        let relayed = operator.drain();
        assert_eq!(relayed[0]["message"]["sender"], "Ana");
        assert_eq!(relayed[0]["message"]["message_id"], message.message_id.as_str());

        let stored = harness.store.fetch(&sid("s1")).await;
        assert_eq!(stored[0].sender.as_str(), "Ana");
    }

    #[tokio::test]
    async fn test_menu_command_shows_top_level_menu() {
        // テスト項目: "menu" でトップレベルメニューが表示され、トランスクリプトは 1 件増える
        // given (前提条件):
        let harness = Harness::new();
        let usecase = create_usecase(&harness);
        let mut visitor = harness.connect_visitor("s1", "Ana").await;
        let mut operator = harness.connect_operator("op").await;

        // when (操作):
        usecase
            .execute(sid("s1"), IncomingMessage::text("MENU"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(harness.store.fetch(&sid("s1")).await.len(), 1);

        let events = visitor.drain();
        let types: Vec<&str> = events.iter().map(|e| e["type"].as_str().unwrap()).collect();
        assert_eq!(types, vec!["message", "show_menu"]);
        let menu = events[1]["menu"].as_array().unwrap();
        assert_eq!(menu.len(), harness.menu.lookup_top_level().len());
        assert!(menu.iter().all(|entry| entry.get("children").is_none()));

        let relayed = operator.drain();
        assert_eq!(relayed.len(), 2);
        assert_eq!(relayed[1]["message"]["sender"], "System");
        assert_eq!(relayed[1]["message"]["text"], "Ana opened the menu");
    }

    #[tokio::test]
    async fn test_message_before_registration_registers_guest() {
        // テスト項目: 名前登録前のメッセージで Guest として登録され、一覧が同期される
        // given (前提条件):
        let harness = Harness::new();
        let usecase = create_usecase(&harness);
        let _visitor = harness.connect("s1").await;
        let mut operator = harness.connect_operator("op").await;

        // when (操作):
        let message = usecase
            .execute(sid("s1"), IncomingMessage::text("hola"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(message.sender.as_str(), "Guest");
        assert_eq!(harness.store.fetch(&sid("s1")).await.len(), 1);
        let types: Vec<String> = operator
            .drain()
            .iter()
            .map(|e| e["type"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(types, vec!["update_session_list", "message_admin"]);
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected() {
        // テスト項目: 空白のみのメッセージは validation notice になり、何も保存されない
        // given (前提条件):
        let harness = Harness::new();
        let usecase = create_usecase(&harness);
        let mut visitor = harness.connect_visitor("s1", "Ana").await;
        let mut operator = harness.connect_operator("op").await;

        // when (操作):
        let result = usecase.execute(sid("s1"), IncomingMessage::text("   ")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(SendMessageError::InvalidText(_))));
        assert!(harness.store.fetch(&sid("s1")).await.is_empty());
        let events = visitor.drain();
        assert_eq!(events[0]["kind"], "validation");
        assert!(operator.drain().is_empty());
    }

    #[tokio::test]
    async fn test_many_messages_keep_order_and_unique_ids() {
        // テスト項目: N 件送信するとトランスクリプトは N 件、順序通りで ID はすべて異なる
        // given (前提条件):
        let harness = Harness::new();
        let usecase = create_usecase(&harness);
        let _visitor = harness.connect_visitor("s1", "Ana").await;

        // when (操作):
        for i in 0..25 {
            let incoming = IncomingMessage {
                text: format!("message {i}"),
                // 重複した ID を送っても新しい ID に置き換えられる
                message_id: Some("same-id".to_string()),
                ..IncomingMessage::default()
            };
            usecase.execute(sid("s1"), incoming).await.unwrap();
        }

        // then (期待する結果):
        let transcript = harness.store.fetch(&sid("s1")).await;
        assert_eq!(transcript.len(), 25);
        for (i, message) in transcript.iter().enumerate() {
            assert_eq!(message.text, format!("message {i}"));
        }
        let ids: std::collections::HashSet<&str> =
            transcript.iter().map(|m| m.message_id.as_str()).collect();
        assert_eq!(ids.len(), 25);
    }
}
