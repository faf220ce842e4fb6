use crate::traits::*;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

/// Default time allowed for a single connection attempt
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(1000);

/// Default number of reconnection attempts before the socket gives up
pub const DEFAULT_MAX_RETRIES: usize = 20;

/// Configuration for a [`ReconnectingSocket`](crate::ReconnectingSocket)
///
/// Built with the type-state [`SocketBuilder`](crate::SocketBuilder).
pub struct SocketConfig {
    /// WebSocket URL (wss:// or ws://)
    pub(crate) url: String,

    /// Time allowed for each connection attempt
    pub(crate) connect_timeout: Duration,

    /// Reconnection attempts allowed after a failure before giving up
    pub(crate) max_retries: usize,

    /// Spacing between reconnection attempts
    pub(crate) reconnect_strategy: Box<dyn ReconnectionStrategy>,

    /// Cleared to stop the socket task
    pub(crate) running: AtomicBool,
}

impl SocketConfig {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn max_retries(&self) -> usize {
        self.max_retries
    }
}

impl std::fmt::Debug for SocketConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocketConfig")
            .field("url", &self.url)
            .field("connect_timeout", &self.connect_timeout)
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}
