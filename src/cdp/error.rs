//! CDP error types.

use thiserror::Error;

/// CDP client errors.
#[derive(Debug, Error)]
pub enum CdpError {
    /// Failed to open the WebSocket connection.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// WebSocket error after the connection was established.
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// The remote returned an error field for a command.
    #[error("CDP error: {message} (code: {code})")]
    Protocol { code: i64, message: String },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No response arrived within the per-command bound.
    #[error("Command timed out: {0}")]
    Timeout(String),

    /// The session or its reader task is gone; all pending commands fail.
    #[error("Session closed")]
    SessionClosed,

    /// JavaScript evaluation raised an exception in the page.
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    /// A response arrived but did not carry the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        CdpError::WebSocket(e.to_string())
    }
}
