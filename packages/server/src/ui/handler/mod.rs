//! Request handlers.

mod http;
mod websocket;

pub use http::{get_menu, get_menu_node, get_session_transcript, health_check, list_sessions};
pub use websocket::websocket_handler;
