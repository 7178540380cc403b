//! Entities: Session, Message, Transcript

use std::collections::{BTreeMap, HashSet};

use super::value_object::{DisplayName, MessageId, MessageText, SessionId, Timestamp};

/// One visitor's connection as known to the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    pub display_name: DisplayName,
    pub created_at: Timestamp,
    pub last_active_at: Timestamp,
}

impl Session {
    pub fn new(id: SessionId, display_name: DisplayName, now: Timestamp) -> Self {
        Self {
            id,
            display_name,
            created_at: now,
            last_active_at: now,
        }
    }

    /// Re-registration: keep `created_at`, replace the name, refresh activity
    pub fn rename(&mut self, display_name: DisplayName, now: Timestamp) {
        self.display_name = display_name;
        self.touch(now);
    }

    pub fn touch(&mut self, now: Timestamp) {
        if now > self.last_active_at {
            self.last_active_at = now;
        }
    }

    pub fn is_idle_since(&self, cutoff: Timestamp) -> bool {
        self.last_active_at < cutoff
    }
}

/// Who authored a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sender {
    /// A visitor, by display name
    Visitor(DisplayName),
    /// The greeting bot, by configured name
    Bot(String),
    /// An operator reply
    Admin,
    /// Server-generated notice
    System,
}

impl Sender {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Visitor(name) => name.as_str(),
            Self::Bot(name) => name,
            Self::Admin => "Admin",
            Self::System => "System",
        }
    }
}

/// A message before it is stored; id and timestamp are optional
#[derive(Debug, Clone, PartialEq)]
pub struct MessageDraft {
    pub text: String,
    pub sender: Sender,
    pub message_id: Option<MessageId>,
    pub timestamp: Option<Timestamp>,
    pub audio_url: Option<String>,
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl MessageDraft {
    pub fn text(text: MessageText, sender: Sender) -> Self {
        Self {
            text: text.into_string(),
            sender,
            message_id: None,
            timestamp: None,
            audio_url: None,
            extra: BTreeMap::new(),
        }
    }

    /// Audio-only message (empty text)
    pub fn audio(audio_url: String, sender: Sender) -> Self {
        Self {
            text: String::new(),
            sender,
            message_id: None,
            timestamp: None,
            audio_url: Some(audio_url),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_message_id(mut self, message_id: Option<MessageId>) -> Self {
        self.message_id = message_id;
        self
    }

    pub fn with_timestamp(mut self, timestamp: Option<Timestamp>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Attach client-supplied fields, minus the ones the server owns
    pub fn with_extra(mut self, extra: BTreeMap<String, serde_json::Value>) -> Self {
        self.extra = strip_reserved_fields(extra);
        self
    }
}

/// Wire keys of a message that only the server may set
pub const RESERVED_MESSAGE_FIELDS: [&str; 6] =
    ["message_id", "text", "timestamp", "sender", "audio_url", "type"];

fn strip_reserved_fields(
    mut extra: BTreeMap<String, serde_json::Value>,
) -> BTreeMap<String, serde_json::Value> {
    extra.retain(|key, _| !RESERVED_MESSAGE_FIELDS.contains(&key.as_str()));
    extra
}

/// Canonical stored message
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub message_id: MessageId,
    pub text: String,
    pub timestamp: Timestamp,
    pub sender: Sender,
    pub audio_url: Option<String>,
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Message {
    /// Notice shown to operators only; never stored in a transcript
    pub fn system_notice(text: String, now: Timestamp) -> Self {
        Self {
            message_id: MessageId::generate(),
            text,
            timestamp: now,
            sender: Sender::System,
            audio_url: None,
            extra: BTreeMap::new(),
        }
    }
}

/// Append-only message history of one session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    messages: Vec<Message>,
    ids: HashSet<MessageId>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `draft`, filling in id and timestamp when absent.
    ///
    /// A supplied id that is already used in this transcript is replaced by a
    /// fresh one.
    pub fn append(&mut self, draft: MessageDraft, now: Timestamp) -> Message {
        let message_id = match draft.message_id {
            Some(id) if !self.ids.contains(&id) => id,
            Some(id) => {
                tracing::debug!("Message id '{}' already used, assigning a new one", id.as_str());
                self.fresh_id()
            }
            None => self.fresh_id(),
        };

        let message = Message {
            message_id: message_id.clone(),
            text: draft.text,
            timestamp: draft.timestamp.unwrap_or(now),
            sender: draft.sender,
            audio_url: draft.audio_url,
            extra: strip_reserved_fields(draft.extra),
        };

        self.ids.insert(message_id);
        self.messages.push(message.clone());
        message
    }

    fn fresh_id(&self) -> MessageId {
        loop {
            let id = MessageId::generate();
            if !self.ids.contains(&id) {
                return id;
            }
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// (id, name) pair pushed to operators by admin sync
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub display_name: DisplayName,
}

impl From<&Session> for SessionSummary {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.id.clone(),
            display_name: session.display_name.clone(),
        }
    }
}
