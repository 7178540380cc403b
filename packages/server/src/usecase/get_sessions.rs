//! UseCase: セッション一覧・詳細の取得（HTTP API 用）

use std::sync::Arc;

use crate::domain::{Message, Session, SessionId, SessionRepository, TranscriptRepository};

use super::error::GetTranscriptError;

pub struct GetSessionsUseCase {
    session_repository: Arc<dyn SessionRepository>,
}

impl GetSessionsUseCase {
    pub fn new(session_repository: Arc<dyn SessionRepository>) -> Self {
        Self { session_repository }
    }

    pub async fn execute(&self) -> Vec<Session> {
        self.session_repository.list().await
    }
}

pub struct GetTranscriptUseCase {
    session_repository: Arc<dyn SessionRepository>,
    transcript_repository: Arc<dyn TranscriptRepository>,
}

impl GetTranscriptUseCase {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        transcript_repository: Arc<dyn TranscriptRepository>,
    ) -> Self {
        Self {
            session_repository,
            transcript_repository,
        }
    }

    /// 登録済みセッションの履歴を取得（未知のセッションはエラー）
    pub async fn execute(&self, session_id: String) -> Result<Vec<Message>, GetTranscriptError> {
        let session_id = SessionId::new(session_id.clone())
            .map_err(|_| GetTranscriptError::SessionNotFound(session_id))?;

        if self.session_repository.get(&session_id).await.is_none() {
            return Err(GetTranscriptError::SessionNotFound(
                session_id.into_string(),
            ));
        }
        Ok(self.transcript_repository.fetch(&session_id).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::Harness;

    #[tokio::test]
    async fn test_get_transcript_of_unknown_session() {
        // テスト項目: 未登録のセッションの履歴取得は SessionNotFound になる
        // given (前提条件):
        let harness = Harness::new();
        let usecase = GetTranscriptUseCase::new(harness.store.clone(), harness.store.clone());

        // when (操作):
        let result = usecase.execute("ghost".to_string()).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(GetTranscriptError::SessionNotFound("ghost".to_string()))
        );
    }

    #[tokio::test]
    async fn test_get_transcript_of_registered_session() {
        // テスト項目: 登録済みで履歴が空のセッションは空の一覧を返す
        // given (前提条件):
        let harness = Harness::new();
        let usecase = GetTranscriptUseCase::new(harness.store.clone(), harness.store.clone());
        let _visitor = harness.connect_visitor("s1", "Ana").await;

        // when (操作):
        let result = usecase.execute("s1".to_string()).await;

        // then (期待する結果):
        assert_eq!(result, Ok(vec![]));
    }

    #[tokio::test]
    async fn test_get_sessions() {
        // テスト項目: 登録済みセッションの一覧を返す
        // given (前提条件):
        let harness = Harness::new();
        let usecase = GetSessionsUseCase::new(harness.store.clone());
        let _a = harness.connect_visitor("s1", "Ana").await;
        let _b = harness.connect_visitor("s2", "Luis").await;

        // when (操作):
        let sessions = usecase.execute().await;

        // then (期待する結果):
        let names: Vec<&str> = sessions.iter().map(|s| s.display_name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Luis"]);
    }
}
