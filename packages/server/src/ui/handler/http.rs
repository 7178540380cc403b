//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    infrastructure::dto::{
        http::{HealthDto, MenuDto, MenuNodeDto, SessionDetailDto, TranscriptDto},
        websocket::{MenuEntryDto, MessageDto},
    },
    ui::state::AppState,
    usecase::{GetMenuNodeError, GetTranscriptError},
};

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}

/// Current session list
pub async fn list_sessions(State(state): State<Arc<AppState>>) -> Json<Vec<SessionDetailDto>> {
    let sessions = state.get_sessions_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(sessions.iter().map(SessionDetailDto::from).collect())
}

/// Transcript of one session
pub async fn get_session_transcript(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<TranscriptDto>, StatusCode> {
    match state.get_transcript_usecase.execute(session_id.clone()).await {
        Ok(messages) => Ok(Json(TranscriptDto {
            session_id,
            messages: messages.iter().map(MessageDto::from).collect(),
        })),
        Err(GetTranscriptError::SessionNotFound(_)) => Err(StatusCode::NOT_FOUND),
    }
}

/// Top-level menu projection
pub async fn get_menu(State(state): State<Arc<AppState>>) -> Json<MenuDto> {
    let entries = state.get_menu_usecase.top_level();
    Json(MenuDto {
        menu: entries.iter().map(MenuEntryDto::from).collect(),
    })
}

/// Typed projection of one menu node
pub async fn get_menu_node(
    State(state): State<Arc<AppState>>,
    Path(node_id): Path<String>,
) -> Result<Json<MenuNodeDto>, StatusCode> {
    match state.get_menu_usecase.node(&node_id) {
        Ok(view) => Ok(Json(MenuNodeDto::from(&view))),
        Err(GetMenuNodeError::NotFound(_)) => Err(StatusCode::NOT_FOUND),
    }
}
