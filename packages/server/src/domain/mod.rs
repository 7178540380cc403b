//! Domain layer: value objects, entities, the menu tree engine and the
//! interfaces the use cases depend on.

pub mod collaborator;
pub mod entity;
pub mod error;
pub mod event;
pub mod menu;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use collaborator::{
    Attachment, DocumentRenderer, DocumentRequest, MailReceipt, Mailer, OutgoingMail,
    SentimentResult, SentimentScorer, Summarizer,
};
pub use entity::{Message, MessageDraft, Sender, Session, SessionSummary, Transcript};
pub use error::{
    ExternalServiceError, MenuError, MessagePushError, RepositoryError, ValueObjectError,
};
pub use event::{NoticeKind, OutboundEvent, SummaryState};
pub use menu::{
    DuplicateIdPolicy, MenuBuild, MenuEntry, MenuNode, MenuNodeConfig, MenuNodeKind, MenuNodeType,
    MenuTree, MenuView,
};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{SessionRepository, TranscriptRepository};
pub use value_object::{
    DEFAULT_DISPLAY_NAME, DisplayName, EmailAddress, MenuNodeId, MessageId, MessageText,
    SessionId, Timestamp,
};
