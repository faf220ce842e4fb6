use thiserror::Error;

/// Main error type for resocket
#[derive(Error, Debug)]
pub enum SocketError {
    /// WebSocket protocol or I/O error
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// Connection closed by the peer
    #[error("Connection closed: {0}")]
    ConnectionClosed(String),

    /// Connection attempt did not complete in time
    #[error("Connection attempt timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The socket task is gone and can no longer accept frames
    #[error("Channel send error: {0}")]
    ChannelSend(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for resocket operations
pub type Result<T> = std::result::Result<T, SocketError>;
