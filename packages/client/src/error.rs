//! Error types for the terminal client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server address cannot be turned into a WebSocket URL
    #[error("Invalid server URL '{0}'")]
    InvalidUrl(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The server closed the socket or the stream failed mid-session
    #[error("Connection lost")]
    ConnectionLost,
}
