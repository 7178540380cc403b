//! ドメイン層のエラー型

use std::time::Duration;

use thiserror::Error;

/// Value Object の生成失敗
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValueObjectError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} is too long ({actual} chars, max {max})")]
    TooLong {
        field: &'static str,
        actual: usize,
        max: usize,
    },

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
}

/// Repository 操作の失敗
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Session '{0}' not found")]
    SessionNotFound(String),
}

/// MessagePusher 操作の失敗
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessagePushError {
    #[error("Client '{0}' not found")]
    ClientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),

    #[error("Failed to encode event: {0}")]
    Encode(String),
}

/// Menu tree construction and lookup failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MenuError {
    #[error("Menu option '{0}' not found")]
    NotFound(String),

    #[error("Menu id '{0}' is defined more than once")]
    DuplicateId(String),

    #[error("Invalid menu node: {0}")]
    InvalidNode(#[from] ValueObjectError),
}

/// Failure of one of the external collaborators (summary, sentiment, rendering, mail)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExternalServiceError {
    #[error("{service} is not configured")]
    NotConfigured { service: &'static str },

    #[error("{service} failed: {reason}")]
    Failed {
        service: &'static str,
        reason: String,
    },

    #[error("{service} timed out after {after:?}")]
    Timeout {
        service: &'static str,
        after: Duration,
    },
}
