//! One WebSocket connection: handshake, event display and command loop.

use futures_util::{Sink, SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{Error as WsError, protocol::Message},
};

use genkan_server::infrastructure::dto::websocket::{ClientEvent, ServerEvent};

use crate::{
    command::{Command, OPERATOR_HELP, VISITOR_HELP, parse_command},
    domain::Role,
    error::ClientError,
};

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

/// Run the WebSocket client session
///
/// Returns `Ok(())` when the user quits, an error when the connection fails
/// or drops.
pub async fn run_client_session(
    url: &str,
    role: &Role,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url).await.map_err(|e| match e {
        WsError::Url(_) => ClientError::InvalidUrl(url.to_string()),
        other => ClientError::ConnectionError(other.to_string()),
    })?;

    tracing::info!("Connected to {}", url);
    let help = match role {
        Role::Visitor { .. } => VISITOR_HELP,
        Role::Operator => OPERATOR_HELP,
    };
    println!("\n{}", help);

    let (mut write, mut read) = ws_stream.split();

    for event in role.handshake() {
        send_event(&mut write, &event).await?;
    }

    let prompt = role.prompt();
    let prompt_for_read = prompt.clone();

    // Spawn a task to display incoming events
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            let formatted = match message {
                Ok(Message::Text(text)) => match serde_json::from_str::<ServerEvent>(&text) {
                    Ok(event) => MessageFormatter::format_event(&event),
                    Err(_) => MessageFormatter::format_raw_message(&text),
                },
                Ok(Message::Binary(data)) => MessageFormatter::format_binary_message(data.len()),
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => continue,
            };
            print!("{}", formatted);
            redisplay_prompt(&prompt_for_read);
        }
    });

    let mut open_session: Option<String> = None;

    loop {
        tokio::select! {
            _ = &mut read_task => {
                return Err(ClientError::ConnectionLost);
            }
            line = input_rx.recv() => {
                let Some(line) = line else {
                    read_task.abort();
                    write.close().await.ok();
                    return Ok(());
                };

                match parse_command(&line, role, open_session.as_deref()) {
                    Ok(Command::Send(event)) => {
                        if let ClientEvent::OperatorSelectSession { session_id } = &event {
                            open_session = Some(session_id.clone());
                        }
                        if let Err(e) = send_event(&mut write, &event).await {
                            read_task.abort();
                            return Err(e);
                        }
                    }
                    Ok(Command::Help) => {
                        print!("{}", help);
                        redisplay_prompt(&prompt);
                    }
                    Ok(Command::Quit) => {
                        read_task.abort();
                        write.close().await.ok();
                        return Ok(());
                    }
                    Err(e) => {
                        println!("{}", e);
                        redisplay_prompt(&prompt);
                    }
                }
            }
        }
    }
}

async fn send_event<S>(write: &mut S, event: &ClientEvent) -> Result<(), ClientError>
where
    S: Sink<Message> + Unpin,
    S::Error: std::fmt::Display,
{
    let json = match serde_json::to_string(event) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize event: {}", e);
            return Ok(());
        }
    };

    write.send(Message::Text(json.into())).await.map_err(|e| {
        tracing::warn!("Failed to send event: {}", e);
        ClientError::ConnectionLost
    })
}
