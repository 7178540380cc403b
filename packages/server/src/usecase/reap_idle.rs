//! UseCase: 非アクティブなセッションの回収

use std::{sync::Arc, time::Duration};

use genkan_shared::time::Clock;

use crate::domain::{SessionId, SessionRepository, Timestamp};

use super::{admin_sync::AdminSyncUseCase, router::BroadcastRouter};

pub struct ReapIdleSessionsUseCase {
    session_repository: Arc<dyn SessionRepository>,
    router: Arc<BroadcastRouter>,
    admin_sync: Arc<AdminSyncUseCase>,
    clock: Arc<dyn Clock>,
    idle_timeout: Duration,
}

impl ReapIdleSessionsUseCase {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        router: Arc<BroadcastRouter>,
        admin_sync: Arc<AdminSyncUseCase>,
        clock: Arc<dyn Clock>,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            session_repository,
            router,
            admin_sync,
            clock,
            idle_timeout,
        }
    }

    /// `idle_timeout` より長く操作のないセッションを削除し、チャンネルを閉じる
    pub async fn execute(&self) -> Vec<SessionId> {
        let Ok(timeout) = chrono::Duration::from_std(self.idle_timeout) else {
            return Vec::new();
        };
        let cutoff = Timestamp::new(self.clock.now_utc() - timeout);

        let mut reaped = Vec::new();
        for session_id in self.session_repository.idle_since(cutoff).await {
            // スキャン後に touch されたセッションはここで残る
            if !self
                .session_repository
                .remove_if_idle(&session_id, cutoff)
                .await
            {
                tracing::debug!("Session '{}' became active again, not reaped", session_id);
                continue;
            }
            self.router.unregister_client(&session_id).await;
            tracing::info!("Reaped idle session '{}'", session_id);
            reaped.push(session_id);
        }

        if !reaped.is_empty() {
            self.admin_sync.execute().await;
        }
        reaped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, Session};
    use crate::infrastructure::repository::InMemorySessionStore;
    use crate::usecase::test_support::{Harness, TEST_NOW, sid};
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use genkan_shared::time::FixedClock;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Clock the test can move forward
    struct SteppingClock(AtomicI64);

    impl Clock for SteppingClock {
        fn now_utc(&self) -> DateTime<Utc> {
            DateTime::from_timestamp(self.0.load(Ordering::SeqCst), 0).unwrap_or_default()
        }
    }

    /// Store whose scan is immediately followed by visitor activity
    struct ActiveAfterScan {
        inner: Arc<InMemorySessionStore>,
        clock: Arc<SteppingClock>,
        active_at: i64,
    }

    #[async_trait]
    impl SessionRepository for ActiveAfterScan {
        async fn register(&self, session_id: SessionId, display_name: DisplayName) -> Session {
            self.inner.register(session_id, display_name).await
        }

        async fn remove(&self, session_id: &SessionId) -> bool {
            self.inner.remove(session_id).await
        }

        async fn touch(&self, session_id: &SessionId) {
            self.inner.touch(session_id).await
        }

        async fn get(&self, session_id: &SessionId) -> Option<Session> {
            self.inner.get(session_id).await
        }

        async fn list(&self) -> Vec<Session> {
            self.inner.list().await
        }

        async fn idle_since(&self, cutoff: Timestamp) -> Vec<SessionId> {
            let idle = self.inner.idle_since(cutoff).await;
            self.clock.0.store(self.active_at, Ordering::SeqCst);
            for session_id in &idle {
                self.inner.touch(session_id).await;
            }
            idle
        }

        async fn remove_if_idle(&self, session_id: &SessionId, cutoff: Timestamp) -> bool {
            self.inner.remove_if_idle(session_id, cutoff).await
        }
    }

    fn create_usecase(harness: &Harness, now: i64, idle_secs: u64) -> ReapIdleSessionsUseCase {
        ReapIdleSessionsUseCase::new(
            harness.store.clone(),
            harness.router.clone(),
            harness.admin_sync.clone(),
            Arc::new(FixedClock::from_unix_seconds(now)),
            Duration::from_secs(idle_secs),
        )
    }

    #[tokio::test]
    async fn test_reap_removes_idle_sessions_and_closes_channel() {
        // テスト項目: タイムアウトを超えたセッションが削除され、チャンネルが閉じられる
        // given (前提条件):
        let harness = Harness::new();
        let mut visitor = harness.connect_visitor("s1", "Ana").await;
        let mut operator = harness.connect_operator("op").await;
        let usecase = create_usecase(&harness, TEST_NOW + 600, 300);

        // when (操作):
        let reaped = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(reaped, vec![sid("s1")]);
        assert!(harness.store.list().await.is_empty());
        assert!(visitor.is_closed());
        let events = operator.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["sessions"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_reap_keeps_recent_sessions() {
        // テスト項目: タイムアウト内のセッションは残り、一覧も送信されない
        // given (前提条件):
        let harness = Harness::new();
        let _visitor = harness.connect_visitor("s1", "Ana").await;
        let mut operator = harness.connect_operator("op").await;
        let usecase = create_usecase(&harness, TEST_NOW + 60, 300);

        // when (操作):
        let reaped = usecase.execute().await;

        // then (期待する結果):
        assert!(reaped.is_empty());
        assert_eq!(harness.store.list().await.len(), 1);
        assert!(operator.drain().is_empty());
    }

    #[tokio::test]
    async fn test_session_touched_after_scan_survives() {
        // テスト項目: スキャン後に操作のあったセッションは回収されず、チャンネルも開いたまま
        // given (前提条件):
        let harness = Harness::new();
        let store_clock = Arc::new(SteppingClock(AtomicI64::new(TEST_NOW)));
        let inner = Arc::new(InMemorySessionStore::new(store_clock.clone()));
        let mut visitor = harness.connect("s1").await;
        inner
            .register(sid("s1"), DisplayName::new("Ana".to_string()).unwrap())
            .await;
        let repository: Arc<dyn SessionRepository> = Arc::new(ActiveAfterScan {
            inner: inner.clone(),
            clock: store_clock,
            active_at: TEST_NOW + 600,
        });
        let admin_sync = Arc::new(AdminSyncUseCase::new(
            repository.clone(),
            harness.router.clone(),
        ));
        let usecase = ReapIdleSessionsUseCase::new(
            repository,
            harness.router.clone(),
            admin_sync,
            Arc::new(FixedClock::from_unix_seconds(TEST_NOW + 600)),
            Duration::from_secs(300),
        );

        // when (操作):
        let reaped = usecase.execute().await;

        // then (期待する結果):
        assert!(reaped.is_empty());
        assert!(inner.get(&sid("s1")).await.is_some());
        assert!(!visitor.is_closed());
        assert!(visitor.drain().is_empty());
    }
}
