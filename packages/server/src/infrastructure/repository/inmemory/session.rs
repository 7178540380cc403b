//! InMemory Session Store 実装
//!
//! ドメイン層が定義する `SessionRepository` と `TranscriptRepository` の両方を
//! 1 つの `Mutex<HashMap>` で実装します。セッションとトランスクリプトを同じ
//! レコードに保持するため、セッション削除とトランスクリプト破棄は同時に起こり、
//! 所有者のいないトランスクリプトは存在しません。
//!
//! 永続化は行いません。プロセスを再起動するとすべて失われます。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use genkan_shared::time::{Clock, SystemClock};

use crate::domain::{
    DisplayName, Message, MessageDraft, RepositoryError, Session, SessionId, SessionRepository,
    Timestamp, Transcript, TranscriptRepository,
};

struct SessionRecord {
    session: Session,
    transcript: Transcript,
}

/// インメモリ Session Store 実装
pub struct InMemorySessionStore {
    records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
    clock: Arc<dyn Clock>,
}

impl InMemorySessionStore {
    /// 新しい InMemorySessionStore を作成
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            clock,
        }
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_utc())
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionStore {
    async fn register(&self, session_id: SessionId, display_name: DisplayName) -> Session {
        let now = self.now();
        let mut records = self.records.lock().await;

        let record = records
            .entry(session_id.clone())
            .and_modify(|record| record.session.rename(display_name.clone(), now))
            .or_insert_with(|| SessionRecord {
                session: Session::new(session_id, display_name, now),
                transcript: Transcript::new(),
            });

        record.session.clone()
    }

    async fn remove(&self, session_id: &SessionId) -> bool {
        let mut records = self.records.lock().await;
        records.remove(session_id).is_some()
    }

    async fn touch(&self, session_id: &SessionId) {
        let now = self.now();
        let mut records = self.records.lock().await;
        if let Some(record) = records.get_mut(session_id) {
            record.session.touch(now);
        }
    }

    async fn get(&self, session_id: &SessionId) -> Option<Session> {
        let records = self.records.lock().await;
        records.get(session_id).map(|record| record.session.clone())
    }

    async fn list(&self) -> Vec<Session> {
        let records = self.records.lock().await;
        let mut sessions: Vec<Session> = records.values().map(|r| r.session.clone()).collect();
        drop(records);

        sessions.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        sessions
    }

    async fn idle_since(&self, cutoff: Timestamp) -> Vec<SessionId> {
        let records = self.records.lock().await;
        records
            .values()
            .filter(|record| record.session.is_idle_since(cutoff))
            .map(|record| record.session.id.clone())
            .collect()
    }

    async fn remove_if_idle(&self, session_id: &SessionId, cutoff: Timestamp) -> bool {
        let mut records = self.records.lock().await;
        let idle = records
            .get(session_id)
            .is_some_and(|record| record.session.is_idle_since(cutoff));
        if idle {
            records.remove(session_id);
        }
        idle
    }
}

#[async_trait]
impl TranscriptRepository for InMemorySessionStore {
    async fn append(
        &self,
        session_id: &SessionId,
        draft: MessageDraft,
    ) -> Result<Message, RepositoryError> {
        let now = self.now();
        let mut records = self.records.lock().await;
        let record = records
            .get_mut(session_id)
            .ok_or_else(|| RepositoryError::SessionNotFound(session_id.as_str().to_string()))?;
        Ok(record.transcript.append(draft, now))
    }

    async fn fetch(&self, session_id: &SessionId) -> Vec<Message> {
        let records = self.records.lock().await;
        records
            .get(session_id)
            .map(|record| record.transcript.messages().to_vec())
            .unwrap_or_default()
    }
}
