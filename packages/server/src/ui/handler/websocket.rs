//! WebSocket connection handlers.
//!
//! The handler only decodes frames and calls use cases. Every connection gets
//! a server-assigned session id and runs as a receive task plus a push task.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{NoticeKind, SessionId},
    infrastructure::dto::websocket::ClientEvent,
    ui::state::AppState,
    usecase::{IncomingMessage, OperatorReply},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that forwards frames from the pusher channel to the WebSocket sink.
///
/// The task ends when the channel is closed (disconnect or reaper) or the
/// socket stops accepting frames.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
        let _ = sender.close().await;
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    // Channel for events pushed to this connection
    let (tx, rx) = mpsc::unbounded_channel();
    let session_id = state.connect_session_usecase.execute(tx).await;

    let recv_state = state.clone();
    let recv_session_id = session_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", recv_session_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received from '{}': {}", recv_session_id, text.as_str());
                    dispatch(&recv_state, &recv_session_id, text.as_str()).await;
                }
                Message::Close(_) => {
                    tracing::info!("Session '{}' requested close", recv_session_id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.disconnect_session_usecase.execute(session_id).await;
}

/// Decode one text frame.
///
/// Frames that are not a JSON object are taken as a plain chat message; a
/// JSON object that is not a known event is an error.
fn decode_client_event(text: &str) -> Result<ClientEvent, String> {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value @ serde_json::Value::Object(_)) => {
            serde_json::from_value(value).map_err(|e| format!("Malformed event: {e}"))
        }
        _ => Ok(ClientEvent::plain_message(text.to_string())),
    }
}

async fn dispatch(state: &Arc<AppState>, session_id: &SessionId, text: &str) {
    let event = match decode_client_event(text) {
        Ok(event) => event,
        Err(reason) => {
            tracing::warn!("Rejected frame from '{}': {}", session_id, reason);
            state
                .router
                .notify(session_id, NoticeKind::Validation, reason)
                .await;
            return;
        }
    };

    let id = session_id.clone();
    match event {
        ClientEvent::RegisterName { name } => {
            if let Err(e) = state.register_name_usecase.execute(id, name).await {
                tracing::warn!("register_name from '{}' failed: {}", session_id, e);
            }
        }
        ClientEvent::Join => {
            state.join_session_usecase.execute(id).await;
        }
        ClientEvent::Message {
            text,
            timestamp,
            message_id,
            extra,
        } => {
            let incoming = IncomingMessage {
                text,
                timestamp,
                message_id,
                extra,
            };
            if let Err(e) = state.send_message_usecase.execute(id, incoming).await {
                tracing::warn!("message from '{}' failed: {}", session_id, e);
            }
        }
        ClientEvent::MenuOptionSelected { id: node_id }
        | ClientEvent::SubmenuOptionSelected { id: node_id } => {
            if let Err(e) = state.navigate_menu_usecase.select_option(id, node_id).await {
                tracing::debug!("Menu selection from '{}' failed: {}", session_id, e);
            }
        }
        ClientEvent::ReturnToMainMenu => {
            state.navigate_menu_usecase.return_to_main_menu(id).await;
        }
        ClientEvent::OperatorSubscribe => {
            if let Err(e) = state.subscribe_operator_usecase.execute(id).await {
                tracing::warn!("operator_subscribe from '{}' failed: {}", session_id, e);
            }
        }
        ClientEvent::OperatorSelectSession { session_id: target } => {
            if let Err(e) = state.select_session_usecase.execute(id, target).await {
                tracing::warn!("operator_select_session from '{}' failed: {}", session_id, e);
            }
        }
        ClientEvent::OperatorMessage {
            session_id: target,
            text,
            message_id,
            timestamp,
        } => {
            let reply = OperatorReply {
                session_id: target,
                text,
                message_id,
                timestamp,
            };
            if let Err(e) = state.operator_message_usecase.execute(id, reply).await {
                tracing::warn!("operator_message from '{}' failed: {}", session_id, e);
            }
        }
        ClientEvent::RequestSummaryEmail { email } => {
            // 外部サービスの呼び出しは受信ループを止めないよう別タスクで実行
            let usecase = state.request_summary_usecase.clone();
            tokio::spawn(async move {
                let requester = id.clone();
                if let Err(e) = usecase.execute(id, email).await {
                    tracing::warn!("Summary request from '{}' failed: {}", requester, e);
                }
            });
        }
    }
}
