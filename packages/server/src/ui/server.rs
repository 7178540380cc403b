//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        get_menu, get_menu_node, get_session_transcript, health_check, list_sessions,
        websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Build the axum router (WebSocket endpoint + HTTP API)
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // WebSocket エンドポイント
        .route("/ws", get(websocket_handler))
        // HTTP エンドポイント
        .route("/api/health", get(health_check))
        .route("/api/sessions", get(list_sessions))
        .route(
            "/api/sessions/{session_id}/transcript",
            get(get_session_transcript),
        )
        .route("/api/menu", get(get_menu))
        .route("/api/menu/{node_id}", get(get_menu_node))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Chat relay server
///
/// # Example
///
/// ```ignore
/// let state = build_app_state(&config, menu, unconfigured_collaborators(), clock);
/// Server::new(state).run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Run until Ctrl+C / SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let reaper = spawn_reaper(&self.state);
        let app = build_router(self.state);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Genkan server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        if let Some(reaper) = reaper {
            reaper.abort();
        }
        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

fn spawn_reaper(state: &AppState) -> Option<JoinHandle<()>> {
    let reaper = state.reap_idle_usecase.clone()?;
    let period = state.reap_interval;
    if period.is_zero() {
        tracing::warn!("Reap interval is zero, inactivity reaper disabled");
        return None;
    }

    tracing::info!("Inactivity reaper running every {:?}", period);
    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // 最初の tick は即時に完了する
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let reaped = reaper.execute().await;
            if !reaped.is_empty() {
                tracing::info!("Reaped {} idle session(s)", reaped.len());
            }
        }
    }))
}
