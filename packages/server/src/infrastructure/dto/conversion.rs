//! Conversion logic between DTOs and domain types.
//!
//! Only the outbound direction lives here. Inbound events are validated
//! field by field in the WebSocket handler, where a failure turns into a
//! `validation` notice instead of a panic.

use crate::domain::{
    MenuEntry, MenuView, Message, NoticeKind, OutboundEvent, Session, SessionSummary,
    SummaryState,
};
use crate::infrastructure::dto::http::{MenuNodeDto, SessionDetailDto};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// Domain → WebSocket DTO
// ========================================

impl From<&Message> for dto::MessageDto {
    fn from(model: &Message) -> Self {
        Self {
            message_id: model.message_id.as_str().to_string(),
            text: model.text.clone(),
            timestamp: model.timestamp.to_rfc3339(),
            sender: model.sender.as_str().to_string(),
            audio_url: model.audio_url.clone(),
            extra: model.extra.clone(),
        }
    }
}

impl From<&SessionSummary> for dto::SessionSummaryDto {
    fn from(model: &SessionSummary) -> Self {
        Self {
            session_id: model.session_id.as_str().to_string(),
            name: model.display_name.as_str().to_string(),
        }
    }
}

impl From<&MenuEntry> for dto::MenuEntryDto {
    fn from(model: &MenuEntry) -> Self {
        Self {
            id: model.id.as_str().to_string(),
            label: model.label.clone(),
            r#type: model.node_type.as_str().to_string(),
        }
    }
}

impl From<NoticeKind> for dto::NoticeKindDto {
    fn from(kind: NoticeKind) -> Self {
        match kind {
            NoticeKind::Validation => Self::Validation,
            NoticeKind::NotFound => Self::NotFound,
        }
    }
}

impl From<SummaryState> for dto::SummaryStateDto {
    fn from(state: SummaryState) -> Self {
        match state {
            SummaryState::Pending => Self::Pending,
            SummaryState::Sent => Self::Sent,
            SummaryState::Failed => Self::Failed,
        }
    }
}

fn entries(entries: &[MenuEntry]) -> Vec<dto::MenuEntryDto> {
    entries.iter().map(dto::MenuEntryDto::from).collect()
}

impl From<&MenuView> for dto::ServerEvent {
    fn from(view: &MenuView) -> Self {
        match view {
            MenuView::Link { label, url } => Self::ShowLink {
                label: label.clone(),
                url: url.clone(),
            },
            MenuView::Submenu {
                id,
                label,
                children,
            } => Self::ShowSubmenu {
                parent_id: id.as_str().to_string(),
                parent_label: label.clone(),
                submenu: entries(children),
            },
            MenuView::Info { label, text } => Self::ShowInfo {
                label: label.clone(),
                text: text.clone(),
            },
            MenuView::Image { label, image_path } => Self::ShowImage {
                label: label.clone(),
                image_path: image_path.clone(),
            },
        }
    }
}

impl From<&OutboundEvent> for dto::ServerEvent {
    fn from(event: &OutboundEvent) -> Self {
        match event {
            OutboundEvent::Connected { session_id } => Self::Connected {
                session_id: session_id.as_str().to_string(),
            },
            OutboundEvent::Message(message) => Self::Message {
                message: message.into(),
            },
            OutboundEvent::ChatHistory {
                session_id,
                messages,
            } => Self::ChatHistory {
                session_id: session_id.as_str().to_string(),
                messages: messages.iter().map(dto::MessageDto::from).collect(),
            },
            OutboundEvent::Relay {
                session_id,
                message,
            } => Self::MessageAdmin {
                session_id: session_id.as_str().to_string(),
                message: message.into(),
            },
            OutboundEvent::SessionList(sessions) => Self::UpdateSessionList {
                sessions: sessions.iter().map(dto::SessionSummaryDto::from).collect(),
            },
            OutboundEvent::ShowMenu(menu) => Self::ShowMenu {
                menu: entries(menu),
            },
            OutboundEvent::ShowMenuNode(view) => view.into(),
            OutboundEvent::Notice { kind, text } => Self::Notice {
                kind: (*kind).into(),
                text: text.clone(),
            },
            OutboundEvent::SummaryStatus { state, message } => Self::SummaryStatus {
                state: (*state).into(),
                message: message.clone(),
            },
        }
    }
}

// ========================================
// Domain → HTTP DTO
// ========================================

impl From<&Session> for SessionDetailDto {
    fn from(model: &Session) -> Self {
        Self {
            session_id: model.id.as_str().to_string(),
            name: model.display_name.as_str().to_string(),
            created_at: model.created_at.to_rfc3339(),
            last_active_at: model.last_active_at.to_rfc3339(),
        }
    }
}

impl From<&MenuView> for MenuNodeDto {
    fn from(view: &MenuView) -> Self {
        match view {
            MenuView::Link { label, url } => Self::Link {
                label: label.clone(),
                url: url.clone(),
            },
            MenuView::Submenu {
                id,
                label,
                children,
            } => Self::Submenu {
                id: id.as_str().to_string(),
                label: label.clone(),
                children: entries(children),
            },
            MenuView::Info { label, text } => Self::Info {
                label: label.clone(),
                text: text.clone(),
            },
            MenuView::Image { label, image_path } => Self::Image {
                label: label.clone(),
                image_path: image_path.clone(),
            },
        }
    }
}
