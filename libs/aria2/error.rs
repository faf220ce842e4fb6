use serde_json::Value;
use thiserror::Error;

/// Errors raised by the session core
#[derive(Error, Debug)]
pub enum SessionError {
    /// The transport refused an outgoing frame
    #[error("Transport error: {0}")]
    Transport(#[from] resocket::SocketError),

    /// An inbound frame was not a JSON-RPC object
    #[error("Malformed message: {0}")]
    MalformedMessage(#[from] serde_json::Error),

    /// A request envelope could not be serialized
    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// The transport spent its retry budget; the session is terminal
    #[error("Unable to reach aria2 after {attempts} reconnection attempts")]
    RetryExhausted { attempts: usize },
}

/// Error payload returned by aria2 for a request
#[derive(Error, Debug, Clone, PartialEq)]
#[error("aria2 returned an error: {0}")]
pub struct ProtocolError(pub Value);

impl ProtocolError {
    /// The JSON-RPC error code, when present
    pub fn code(&self) -> Option<i64> {
        self.0.get("code").and_then(Value::as_i64)
    }

    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }
}

/// Errors surfaced to host code awaiting a call
#[derive(Error, Debug)]
pub enum ClientError {
    /// The session task is gone, or dropped the call without replying
    #[error("Session closed before the call completed")]
    SessionClosed,

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl From<resocket::SocketError> for ClientError {
    fn from(err: resocket::SocketError) -> Self {
        ClientError::Session(SessionError::Transport(err))
    }
}
