pub mod states;

use crate::client::ReconnectingSocket;
use crate::config::{SocketConfig, DEFAULT_CONNECT_TIMEOUT, DEFAULT_MAX_RETRIES};
use crate::traits::*;
use states::*;
use std::marker::PhantomData;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

/// Type-state builder for [`ReconnectingSocket`]
///
/// The URL is the only required field; `start()` is not available until it
/// has been set.
pub struct SocketBuilder<U: UrlState> {
    _url_state: PhantomData<U>,
    url: Option<String>,
    connect_timeout: Duration,
    max_retries: usize,
    reconnect_strategy: Option<Box<dyn ReconnectionStrategy>>,
}

impl SocketBuilder<NoUrl> {
    /// Create a new builder instance
    pub fn new() -> Self {
        Self {
            _url_state: PhantomData,
            url: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            reconnect_strategy: None,
        }
    }

    pub fn url(self, url: impl Into<String>) -> SocketBuilder<HasUrl> {
        SocketBuilder {
            _url_state: PhantomData,
            url: Some(url.into()),
            connect_timeout: self.connect_timeout,
            max_retries: self.max_retries,
            reconnect_strategy: self.reconnect_strategy,
        }
    }
}

impl Default for SocketBuilder<NoUrl> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: UrlState> SocketBuilder<U> {
    /// Time allowed for each connection attempt (default 1s)
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Reconnection attempts allowed before the socket enters `Failed` (default 20)
    pub fn max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn reconnect_strategy(mut self, strategy: impl ReconnectionStrategy + 'static) -> Self {
        self.reconnect_strategy = Some(Box::new(strategy));
        self
    }
}

impl SocketBuilder<HasUrl> {
    /// Build the configuration without starting the socket
    pub fn build_config(self) -> Result<SocketConfig> {
        let url = self
            .url
            .ok_or_else(|| SocketError::Configuration("URL must be set".to_string()))?;

        if !(url.starts_with("ws://") || url.starts_with("wss://")) {
            return Err(SocketError::Configuration(format!(
                "unsupported URL scheme: {}",
                url
            )));
        }
        if self.connect_timeout.is_zero() {
            return Err(SocketError::Configuration(
                "connect_timeout must be greater than 0".to_string(),
            ));
        }

        Ok(SocketConfig {
            url,
            connect_timeout: self.connect_timeout,
            max_retries: self.max_retries,
            reconnect_strategy: self
                .reconnect_strategy
                .unwrap_or_else(|| Box::new(ExponentialBackoff::default())),
            running: AtomicBool::new(true),
        })
    }

    /// Build the configuration and spawn the socket task
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(self) -> Result<ReconnectingSocket> {
        Ok(ReconnectingSocket::start(self.build_config()?))
    }
}
