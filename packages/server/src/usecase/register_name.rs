//! UseCase: 名前登録とウェルカムメッセージ
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RegisterNameUseCase::execute()
//! - レジストリ登録、ウェルカムメッセージ 2 件の保存・エコー・中継、Admin Sync
//!
//! ### どのような状況を想定しているか
//! - 正常系：名前を登録する（Scenario A）
//! - 正常系：名前省略時は Guest になる
//! - 異常系：長すぎる名前は validation notice になり、何も保存されない

use std::sync::Arc;

use crate::domain::{
    DisplayName, MessageDraft, MessageText, NoticeKind, OutboundEvent, Sender, Session, SessionId,
    SessionRepository, TranscriptRepository,
};

use super::{admin_sync::AdminSyncUseCase, error::RegisterNameError, router::BroadcastRouter};

/// ウェルカムメッセージの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomeConfig {
    /// ボットの表示名（メッセージの sender）
    pub bot_name: String,
    /// ウェルカム音声の URL
    pub audio_url: String,
}

impl Default for WelcomeConfig {
    fn default() -> Self {
        Self {
            bot_name: "Genbot".to_string(),
            audio_url: "/static/audio/welcome.mp3".to_string(),
        }
    }
}

fn welcome_text(name: &DisplayName) -> String {
    format!(
        "Hello {name}, welcome! Type \"menu\" or press the menu button to open the interactive menu."
    )
}

/// 名前登録のユースケース
pub struct RegisterNameUseCase {
    session_repository: Arc<dyn SessionRepository>,
    transcript_repository: Arc<dyn TranscriptRepository>,
    router: Arc<BroadcastRouter>,
    admin_sync: Arc<AdminSyncUseCase>,
    welcome: WelcomeConfig,
}

impl RegisterNameUseCase {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        transcript_repository: Arc<dyn TranscriptRepository>,
        router: Arc<BroadcastRouter>,
        admin_sync: Arc<AdminSyncUseCase>,
        welcome: WelcomeConfig,
    ) -> Self {
        Self {
            session_repository,
            transcript_repository,
            router,
            admin_sync,
            welcome,
        }
    }

    /// 名前を登録（再登録は上書き）し、ウェルカムメッセージを送る
    pub async fn execute(
        &self,
        session_id: SessionId,
        name: Option<String>,
    ) -> Result<Session, RegisterNameError> {
        let display_name = match DisplayName::from_optional(name) {
            Ok(name) => name,
            Err(e) => {
                self.router
                    .notify(&session_id, NoticeKind::Validation, e.to_string())
                    .await;
                return Err(RegisterNameError::InvalidName(e));
            }
        };

        let session = self
            .session_repository
            .register(session_id.clone(), display_name.clone())
            .await;
        tracing::info!(
            "Session '{}' registered as '{}'",
            session_id,
            display_name
        );

        let bot = Sender::Bot(self.welcome.bot_name.clone());
        let mut drafts = Vec::with_capacity(2);
        match MessageText::new(welcome_text(&display_name)) {
            Ok(text) => drafts.push(MessageDraft::text(text, bot.clone())),
            Err(e) => tracing::warn!("Welcome text rejected: {}", e),
        }
        drafts.push(MessageDraft::audio(self.welcome.audio_url.clone(), bot));

        for draft in drafts {
            match self.transcript_repository.append(&session_id, draft).await {
                Ok(message) => {
                    self.router
                        .deliver_to_session(&session_id, OutboundEvent::Message(message.clone()))
                        .await;
                    self.router.relay_to_operators(&session_id, message).await;
                }
                // 登録直後に切断された場合
                Err(e) => tracing::warn!("Welcome message dropped: {}", e),
            }
        }

        self.admin_sync.execute().await;
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{Harness, sid};

    fn create_usecase(harness: &Harness) -> RegisterNameUseCase {
        RegisterNameUseCase::new(
            harness.store.clone(),
            harness.store.clone(),
            harness.router.clone(),
            harness.admin_sync.clone(),
            WelcomeConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_register_name_sends_welcome_and_syncs() {
        // テスト項目: 名前登録でウェルカム 2 件が保存され、オペレーターに中継 2 件と一覧更新 1 件が届く
        // given (前提条件):
        let harness = Harness::new();
        let usecase = create_usecase(&harness);
        let mut visitor = harness.connect("s1").await;
        let mut operator = harness.connect_operator("op").await;

        // when (操作):
        let session = usecase
            .execute(sid("s1"), Some("Ana".to_string()))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(session.display_name.as_str(), "Ana");

        let transcript = harness.store.fetch(&sid("s1")).await;
        assert_eq!(transcript.len(), 2);
        assert!(transcript[0].text.starts_with("Hello Ana, welcome!"));
        assert_eq!(transcript[0].sender.as_str(), "Genbot");
        assert_eq!(transcript[1].text, "");
        assert_eq!(
            transcript[1].audio_url.as_deref(),
            Some("/static/audio/welcome.mp3")
        );

        let visitor_events = visitor.drain();
        assert_eq!(visitor_events.len(), 2);
        assert!(visitor_events.iter().all(|e| e["type"] == "message"));

        let operator_events = operator.drain();
        let types: Vec<&str> = operator_events
            .iter()
            .map(|e| e["type"].as_str().unwrap())
            .collect();
        assert_eq!(
            types,
            vec!["message_admin", "message_admin", "update_session_list"]
        );
        assert_eq!(
            operator_events[2]["sessions"],
            serde_json::json!([{"session_id": "s1", "name": "Ana"}])
        );
    }

    #[tokio::test]
    async fn test_register_without_name_uses_guest() {
        // テスト項目: 名前を省略すると Guest として登録される
        // given (前提条件):
        let harness = Harness::new();
        let usecase = create_usecase(&harness);
        let _visitor = harness.connect("s1").await;

        // when (操作):
        let session = usecase.execute(sid("s1"), None).await.unwrap();

        // then (期待する結果):
        assert_eq!(session.display_name.as_str(), "Guest");
    }

    #[tokio::test]
    async fn test_register_too_long_name_is_rejected() {
        // テスト項目: 長すぎる名前は validation notice になり、レジストリは変化しない
        // given (前提条件):
        let harness = Harness::new();
        let usecase = create_usecase(&harness);
        let mut visitor = harness.connect("s1").await;
        let mut operator = harness.connect_operator("op").await;

        // when (操作):
        let result = usecase.execute(sid("s1"), Some("x".repeat(65))).await;

        // then (期待する結果):
        assert!(matches!(result, Err(RegisterNameError::InvalidName(_))));
        assert!(harness.store.list().await.is_empty());
        let events = visitor.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["type"], "notice");
        assert_eq!(events[0]["kind"], "validation");
        assert!(operator.drain().is_empty());
    }
}
