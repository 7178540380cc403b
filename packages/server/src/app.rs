//! Dependency wiring shared by the server binary and the integration tests.

use std::sync::Arc;

use genkan_shared::time::Clock;

use crate::{
    config::ServerConfig,
    domain::MenuTree,
    infrastructure::{
        collaborator::{
            UnconfiguredDocumentRenderer, UnconfiguredMailer, UnconfiguredSentimentScorer,
            UnconfiguredSummarizer,
        },
        message_pusher::WebSocketMessagePusher,
        repository::InMemorySessionStore,
    },
    ui::state::AppState,
    usecase::{
        AdminSyncUseCase, BroadcastRouter, ConnectSessionUseCase, DisconnectSessionUseCase,
        GetMenuUseCase, GetSessionsUseCase, GetTranscriptUseCase, JoinSessionUseCase,
        NavigateMenuUseCase, OperatorMessageUseCase, ReapIdleSessionsUseCase,
        RegisterNameUseCase, RequestSummaryUseCase, SelectSessionUseCase, SendMessageUseCase,
        SubscribeOperatorUseCase, SummaryCollaborators,
    },
};

/// Collaborators that fail with `NotConfigured`
pub fn unconfigured_collaborators() -> SummaryCollaborators {
    SummaryCollaborators {
        summarizer: Arc::new(UnconfiguredSummarizer),
        sentiment_scorer: Arc::new(UnconfiguredSentimentScorer),
        document_renderer: Arc::new(UnconfiguredDocumentRenderer),
        mailer: Arc::new(UnconfiguredMailer),
    }
}

/// Build every use case on top of one in-memory store and one pusher
pub fn build_app_state(
    config: &ServerConfig,
    menu: MenuTree,
    collaborators: SummaryCollaborators,
    clock: Arc<dyn Clock>,
) -> AppState {
    // 1. Repository (session registry + transcript store)
    let store = Arc::new(InMemorySessionStore::new(clock.clone()));

    // 2. MessagePusher and router
    let message_pusher = Arc::new(WebSocketMessagePusher::new());
    let router = Arc::new(BroadcastRouter::new(message_pusher));

    // 3. UseCases
    let menu = Arc::new(menu);
    let admin_sync = Arc::new(AdminSyncUseCase::new(store.clone(), router.clone()));

    let reap_idle_usecase = config.idle_timeout.map(|idle_timeout| {
        Arc::new(ReapIdleSessionsUseCase::new(
            store.clone(),
            router.clone(),
            admin_sync.clone(),
            clock.clone(),
            idle_timeout,
        ))
    });

    AppState {
        connect_session_usecase: Arc::new(ConnectSessionUseCase::new(router.clone())),
        register_name_usecase: Arc::new(RegisterNameUseCase::new(
            store.clone(),
            store.clone(),
            router.clone(),
            admin_sync.clone(),
            config.welcome.clone(),
        )),
        join_session_usecase: Arc::new(JoinSessionUseCase::new(
            store.clone(),
            store.clone(),
            router.clone(),
        )),
        send_message_usecase: Arc::new(SendMessageUseCase::new(
            store.clone(),
            store.clone(),
            router.clone(),
            admin_sync.clone(),
            menu.clone(),
            clock.clone(),
        )),
        navigate_menu_usecase: Arc::new(NavigateMenuUseCase::new(
            store.clone(),
            router.clone(),
            menu.clone(),
            clock,
        )),
        subscribe_operator_usecase: Arc::new(SubscribeOperatorUseCase::new(
            router.clone(),
            admin_sync.clone(),
        )),
        select_session_usecase: Arc::new(SelectSessionUseCase::new(
            store.clone(),
            router.clone(),
        )),
        operator_message_usecase: Arc::new(OperatorMessageUseCase::new(
            store.clone(),
            store.clone(),
            router.clone(),
        )),
        disconnect_session_usecase: Arc::new(DisconnectSessionUseCase::new(
            store.clone(),
            router.clone(),
            admin_sync,
        )),
        request_summary_usecase: Arc::new(RequestSummaryUseCase::new(
            store.clone(),
            store.clone(),
            router.clone(),
            collaborators,
            config.external_timeout,
            config.welcome.bot_name.clone(),
        )),
        get_sessions_usecase: Arc::new(GetSessionsUseCase::new(store.clone())),
        get_transcript_usecase: Arc::new(GetTranscriptUseCase::new(store.clone(), store)),
        get_menu_usecase: Arc::new(GetMenuUseCase::new(menu)),
        reap_idle_usecase,
        reap_interval: config.reap_interval,
        router,
    }
}
