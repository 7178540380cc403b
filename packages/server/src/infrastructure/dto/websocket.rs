//! WebSocket event DTOs.
//!
//! Every frame is a JSON object tagged by `type`. The client crate reuses
//! these types to encode its commands and decode server events.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Events sent by visitors and operators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    RegisterName {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    Join,
    Message {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message_id: Option<String>,
        /// Client-supplied fields carried through to the stored message
        #[serde(flatten)]
        extra: BTreeMap<String, serde_json::Value>,
    },
    MenuOptionSelected {
        id: String,
    },
    SubmenuOptionSelected {
        id: String,
    },
    ReturnToMainMenu,
    OperatorSubscribe,
    OperatorSelectSession {
        session_id: String,
    },
    OperatorMessage {
        session_id: String,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<String>,
    },
    #[serde(alias = "request_summary")]
    RequestSummaryEmail {
        email: String,
    },
}

impl ClientEvent {
    /// Plain chat message with no optional fields
    pub fn plain_message(text: String) -> Self {
        Self::Message {
            text,
            timestamp: None,
            message_id: None,
            extra: BTreeMap::new(),
        }
    }
}

/// Events pushed by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    Connected {
        session_id: String,
    },
    Message {
        message: MessageDto,
    },
    ChatHistory {
        session_id: String,
        messages: Vec<MessageDto>,
    },
    MessageAdmin {
        session_id: String,
        message: MessageDto,
    },
    UpdateSessionList {
        sessions: Vec<SessionSummaryDto>,
    },
    ShowMenu {
        menu: Vec<MenuEntryDto>,
    },
    ShowSubmenu {
        parent_id: String,
        parent_label: String,
        submenu: Vec<MenuEntryDto>,
    },
    ShowLink {
        label: String,
        url: String,
    },
    ShowInfo {
        label: String,
        text: String,
    },
    ShowImage {
        label: String,
        image_path: String,
    },
    Notice {
        kind: NoticeKindDto,
        text: String,
    },
    SummaryStatus {
        state: SummaryStateDto,
        message: String,
    },
}

/// Stored message as seen on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageDto {
    pub message_id: String,
    pub text: String,
    /// RFC 3339, second precision, UTC
    pub timestamp: String,
    pub sender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummaryDto {
    pub session_id: String,
    pub name: String,
}

/// Shallow menu entry; never carries children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntryDto {
    pub id: String,
    pub label: String,
    pub r#type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKindDto {
    Validation,
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStateDto {
    Pending,
    Sent,
    Failed,
}
