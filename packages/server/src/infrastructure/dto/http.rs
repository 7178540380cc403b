//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::{MenuEntryDto, MessageDto};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
}

/// Session detail including activity timestamps (RFC 3339, UTC)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDetailDto {
    pub session_id: String,
    pub name: String,
    pub created_at: String,
    pub last_active_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptDto {
    pub session_id: String,
    pub messages: Vec<MessageDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuDto {
    pub menu: Vec<MenuEntryDto>,
}

/// Typed node projection, tagged by node type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MenuNodeDto {
    Link {
        label: String,
        url: String,
    },
    Submenu {
        id: String,
        label: String,
        children: Vec<MenuEntryDto>,
    },
    Info {
        label: String,
        text: String,
    },
    Image {
        label: String,
        image_path: String,
    },
}
