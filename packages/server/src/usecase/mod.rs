//! UseCase 層
//!
//! トランスポートから届いたイベントごとに 1 つのユースケースを用意します。
//! 各ユースケースは Repository / BroadcastRouter を `Arc` で受け取り、
//! `execute`（またはイベント名に対応するメソッド）で処理を行います。

pub mod admin_sync;
pub mod connect_session;
pub mod disconnect_session;
pub mod error;
pub mod get_menu;
pub mod get_sessions;
pub mod join_session;
pub mod navigate_menu;
pub mod operator_message;
pub mod reap_idle;
pub mod register_name;
pub mod request_summary;
pub mod router;
pub mod select_session;
pub mod send_message;
pub mod subscribe_operator;

#[cfg(test)]
pub(crate) mod test_support;

pub use admin_sync::AdminSyncUseCase;
pub use connect_session::ConnectSessionUseCase;
pub use disconnect_session::DisconnectSessionUseCase;
pub use error::{
    GetMenuNodeError, GetTranscriptError, NavigateMenuError, OperatorMessageError,
    RegisterNameError, RequestSummaryError, SelectSessionError, SendMessageError,
    SubscribeOperatorError,
};
pub use get_menu::GetMenuUseCase;
pub use get_sessions::{GetSessionsUseCase, GetTranscriptUseCase};
pub use join_session::JoinSessionUseCase;
pub use navigate_menu::NavigateMenuUseCase;
pub use operator_message::{OperatorMessageUseCase, OperatorReply};
pub use reap_idle::ReapIdleSessionsUseCase;
pub use register_name::{RegisterNameUseCase, WelcomeConfig};
pub use request_summary::{RequestSummaryUseCase, SummaryCollaborators};
pub use router::BroadcastRouter;
pub use select_session::SelectSessionUseCase;
pub use send_message::{IncomingMessage, SendMessageUseCase};
pub use subscribe_operator::SubscribeOperatorUseCase;
