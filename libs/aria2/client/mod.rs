//! Async host API
//!
//! [`Aria2Client`] starts a [`ReconnectingSocket`], moves a [`Session`] onto
//! its own task and talks to it through a [`SessionHandle`].

mod actor;
mod handle;

pub use actor::SessionStats;
pub use handle::SessionHandle;

use crate::config::{Aria2Config, CONNECT_TIMEOUT, MAX_RETRIES};
use crate::error::ClientError;
use crate::protocol::Aria2Event;
use crate::session::{Callback, Session};
use actor::run_session;
use parking_lot::Mutex;
use resocket::{AtomicConnectionState, ConnectionState, Metrics, ReconnectingSocket, SocketError};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::info;

/// A connected aria2 client
///
/// Must be created inside a tokio runtime.
pub struct Aria2Client {
    socket: Arc<ReconnectingSocket>,
    handle: SessionHandle,
    state: Arc<AtomicConnectionState>,
    fatal_rx: watch::Receiver<bool>,
    task_handle: Mutex<Option<JoinHandle<()>>>,
}

impl Aria2Client {
    /// Start connecting to `config.url` and spawn the session task
    ///
    /// Returns immediately; calls made before the connection opens are queued.
    pub fn connect(config: &Aria2Config) -> Result<Self, ClientError> {
        let socket = ReconnectingSocket::builder()
            .url(config.url.clone())
            .connect_timeout(CONNECT_TIMEOUT)
            .max_retries(MAX_RETRIES)
            .start()?;
        Self::start(socket, config.token.clone())
    }

    /// Spawn the session task on an already started socket
    ///
    /// Fails if the socket's event stream has been taken.
    pub fn start(socket: ReconnectingSocket, token: Option<String>) -> Result<Self, ClientError> {
        let socket = Arc::new(socket);

        let events = socket.take_events().ok_or_else(|| {
            SocketError::Configuration("socket event stream already taken".to_string())
        })?;

        let mut session = Session::new(Arc::clone(&socket), token);
        session.begin_connect();

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (fatal_tx, fatal_rx) = watch::channel(false);
        let state = Arc::new(AtomicConnectionState::new(session.state()));

        let task_handle = {
            let state = Arc::clone(&state);
            tokio::spawn(async move {
                run_session(session, events, command_rx, state, fatal_tx).await;
            })
        };

        info!("aria2 client started for {}", socket.url());

        Ok(Self {
            socket,
            handle: SessionHandle::new(command_tx),
            state,
            fatal_rx,
            task_handle: Mutex::new(Some(task_handle)),
        })
    }

    /// Register `handler` for `event`, replacing any earlier handler
    pub fn on<F>(&self, event: impl Into<Aria2Event>, handler: F) -> &Self
    where
        F: FnMut(Value) + Send + 'static,
    {
        self.handle.on(event, handler);
        self
    }

    /// Call an unprefixed aria2 method without waiting for the result
    pub fn send(&self, method: &str, params: Option<Vec<Value>>, callback: Option<Callback>) -> &Self {
        self.handle.send(method, params, callback);
        self
    }

    /// Call an unprefixed aria2 method and wait for its result
    pub async fn call(&self, method: &str, params: Option<Vec<Value>>) -> Result<Value, ClientError> {
        self.handle.call(method, params).await
    }

    pub async fn stats(&self) -> Result<SessionStats, ClientError> {
        self.handle.stats().await
    }

    /// A cloneable handle for use inside handlers or other tasks
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Session state as of the last processed notification
    pub fn state(&self) -> ConnectionState {
        self.state.get()
    }

    /// Whether the retry budget has been spent
    pub fn is_failed(&self) -> bool {
        *self.fatal_rx.borrow()
    }

    /// Resolve once the retry budget is spent
    ///
    /// Returns `false` if the session stopped for any other reason first.
    pub async fn wait_fatal(&self) -> bool {
        let mut fatal_rx = self.fatal_rx.clone();
        let fatal = fatal_rx.wait_for(|fatal| *fatal).await.is_ok();
        fatal
    }

    pub fn socket_metrics(&self) -> Metrics {
        self.socket.metrics()
    }

    pub fn url(&self) -> &str {
        self.socket.url()
    }

    /// Stop the session task and close the connection
    ///
    /// Queued calls and pending handlers are dropped without being invoked.
    pub async fn shutdown(&self) {
        info!("Shutting down aria2 client");
        self.handle.shutdown();

        let handle = self.task_handle.lock().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
        self.socket.shutdown().await;
    }
}

impl Drop for Aria2Client {
    fn drop(&mut self) {
        self.handle.shutdown();
    }
}

impl std::fmt::Debug for Aria2Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aria2Client")
            .field("url", &self.socket.url())
            .field("state", &self.state.get())
            .field("failed", &self.is_failed())
            .finish()
    }
}
