//! Shared application state.

use std::{sync::Arc, time::Duration};

use crate::usecase::{
    BroadcastRouter, ConnectSessionUseCase, DisconnectSessionUseCase, GetMenuUseCase,
    GetSessionsUseCase, GetTranscriptUseCase, JoinSessionUseCase, NavigateMenuUseCase,
    OperatorMessageUseCase, ReapIdleSessionsUseCase, RegisterNameUseCase, RequestSummaryUseCase,
    SelectSessionUseCase, SendMessageUseCase, SubscribeOperatorUseCase,
};

/// Use cases shared by every handler
pub struct AppState {
    // WebSocket イベント
    pub connect_session_usecase: Arc<ConnectSessionUseCase>,
    pub register_name_usecase: Arc<RegisterNameUseCase>,
    pub join_session_usecase: Arc<JoinSessionUseCase>,
    pub send_message_usecase: Arc<SendMessageUseCase>,
    pub navigate_menu_usecase: Arc<NavigateMenuUseCase>,
    pub subscribe_operator_usecase: Arc<SubscribeOperatorUseCase>,
    pub select_session_usecase: Arc<SelectSessionUseCase>,
    pub operator_message_usecase: Arc<OperatorMessageUseCase>,
    pub disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    pub request_summary_usecase: Arc<RequestSummaryUseCase>,

    // HTTP API
    pub get_sessions_usecase: Arc<GetSessionsUseCase>,
    pub get_transcript_usecase: Arc<GetTranscriptUseCase>,
    pub get_menu_usecase: Arc<GetMenuUseCase>,

    /// `None` when the inactivity reaper is disabled
    pub reap_idle_usecase: Option<Arc<ReapIdleSessionsUseCase>>,
    pub reap_interval: Duration,

    /// Used by the transport for notices about frames it could not decode
    pub router: Arc<BroadcastRouter>,
}
