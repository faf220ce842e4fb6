use super::actor::{SessionCommand, SessionStats};
use crate::error::ClientError;
use crate::protocol::Aria2Event;
use crate::session::{Callback, QueuedCall, Reply};
use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::oneshot;
use tracing::warn;

/// Cloneable access to a running session
///
/// Handles are safe to use from inside completion and event handlers: the
/// command is picked up after the handler returns.
#[derive(Clone)]
pub struct SessionHandle {
    commands: UnboundedSender<SessionCommand>,
}

impl SessionHandle {
    pub(crate) fn new(commands: UnboundedSender<SessionCommand>) -> Self {
        Self { commands }
    }

    /// Register `handler` for `event`, replacing any earlier handler
    pub fn on<F>(&self, event: impl Into<Aria2Event>, handler: F) -> &Self
    where
        F: FnMut(Value) + Send + 'static,
    {
        let event = event.into();
        if self
            .commands
            .send(SessionCommand::On(event.clone(), Box::new(handler)))
            .is_err()
        {
            warn!("Session closed, handler for {} not registered", event);
        }
        self
    }

    /// Call an unprefixed aria2 method without waiting for the result
    pub fn send(&self, method: &str, params: Option<Vec<Value>>, callback: Option<Callback>) -> &Self {
        if self
            .commands
            .send(SessionCommand::Send(QueuedCall::new(method, params, callback)))
            .is_err()
        {
            warn!("Session closed, dropping call to {}", method);
        }
        self
    }

    /// Call an unprefixed aria2 method and wait for its result
    ///
    /// While a generic `error` handler is registered, error responses go to
    /// that handler and this future does not complete for them.
    pub async fn call(&self, method: &str, params: Option<Vec<Value>>) -> Result<Value, ClientError> {
        let (tx, rx) = oneshot::channel::<Reply>();
        let callback: Callback = Box::new(move |reply| {
            let _ = tx.send(reply);
        });

        self.commands
            .send(SessionCommand::Send(QueuedCall::new(method, params, Some(callback))))
            .map_err(|_| ClientError::SessionClosed)?;

        let reply = rx.await.map_err(|_| ClientError::SessionClosed)?;
        Ok(reply?)
    }

    /// Queue and pending counts of the session
    pub async fn stats(&self) -> Result<SessionStats, ClientError> {
        let (tx, rx) = oneshot::channel();
        self.commands
            .send(SessionCommand::Stats(tx))
            .map_err(|_| ClientError::SessionClosed)?;
        rx.await.map_err(|_| ClientError::SessionClosed)
    }

    /// Whether the session task has stopped
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    pub(crate) fn shutdown(&self) {
        let _ = self.commands.send(SessionCommand::Shutdown);
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("closed", &self.is_closed())
            .finish()
    }
}
