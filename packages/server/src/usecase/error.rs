//! UseCase 層のエラー型
//!
//! どのエラーも呼び出し元（UI 層）でログに記録されるだけで、接続を切断しません。
//! クライアントへの通知（notice / summary_status）はユースケース内で送信済みです。

use thiserror::Error;

use crate::domain::{ExternalServiceError, ValueObjectError};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegisterNameError {
    #[error("Invalid display name: {0}")]
    InvalidName(ValueObjectError),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SendMessageError {
    #[error("Invalid message text: {0}")]
    InvalidText(ValueObjectError),

    #[error("Session '{0}' not found")]
    SessionNotFound(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum NavigateMenuError {
    #[error("Menu option '{0}' not found")]
    OptionNotFound(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SubscribeOperatorError {
    #[error("Channel '{0}' is not connected")]
    ChannelNotFound(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SelectSessionError {
    #[error("Invalid session id: {0}")]
    InvalidSessionId(ValueObjectError),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OperatorMessageError {
    #[error("Invalid message text: {0}")]
    InvalidText(ValueObjectError),

    #[error("Invalid session id: {0}")]
    InvalidSessionId(ValueObjectError),

    #[error("Session '{0}' not found")]
    SessionNotFound(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RequestSummaryError {
    #[error("Invalid email address: {0}")]
    InvalidEmail(ValueObjectError),

    #[error("No conversation history to summarize")]
    NoHistory,

    #[error("A summary is already in progress for this session")]
    AlreadyPending,

    #[error(transparent)]
    External(#[from] ExternalServiceError),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GetTranscriptError {
    #[error("Session '{0}' not found")]
    SessionNotFound(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GetMenuNodeError {
    #[error("Menu node '{0}' not found")]
    NotFound(String),
}
