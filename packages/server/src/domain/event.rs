//! Events the server pushes to visitor and operator channels.
//!
//! These are protocol-agnostic; the infrastructure layer decides how an event
//! is encoded on the wire.

use super::entity::{Message, SessionSummary};
use super::menu::{MenuEntry, MenuView};
use super::value_object::SessionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Validation,
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryState {
    Pending,
    Sent,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutboundEvent {
    /// First event on every connection
    Connected { session_id: SessionId },
    /// A transcript message for the visitor's own channel
    Message(Message),
    /// Full transcript replay
    ChatHistory {
        session_id: SessionId,
        messages: Vec<Message>,
    },
    /// A visitor-side message wrapped with its session id, for operators
    Relay {
        session_id: SessionId,
        message: Message,
    },
    /// Admin sync payload
    SessionList(Vec<SessionSummary>),
    /// Top-level menu projection
    ShowMenu(Vec<MenuEntry>),
    /// Result of a successful menu selection
    ShowMenuNode(MenuView),
    /// Local notice for the requesting channel only
    Notice { kind: NoticeKind, text: String },
    SummaryStatus { state: SummaryState, message: String },
}

impl OutboundEvent {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Connected { .. } => "connected",
            Self::Message(_) => "message",
            Self::ChatHistory { .. } => "chat_history",
            Self::Relay { .. } => "message_admin",
            Self::SessionList(_) => "update_session_list",
            Self::ShowMenu(_) => "show_menu",
            Self::ShowMenuNode(MenuView::Link { .. }) => "show_link",
            Self::ShowMenuNode(MenuView::Submenu { .. }) => "show_submenu",
            Self::ShowMenuNode(MenuView::Info { .. }) => "show_info",
            Self::ShowMenuNode(MenuView::Image { .. }) => "show_image",
            Self::Notice { .. } => "notice",
            Self::SummaryStatus { .. } => "summary_status",
        }
    }
}
