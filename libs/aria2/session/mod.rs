//! The synchronous session core
//!
//! A [`Session`] owns everything with ordering guarantees: the offline queue,
//! the pending callbacks, the event handlers and its own view of the
//! connection state. It never blocks and never spawns; whoever drives it
//! feeds it transport notifications one at a time.

mod dispatcher;
mod lifecycle;
pub mod pending;
pub mod queue;
pub mod registry;
mod router;

pub use pending::PendingCallbacks;
pub use queue::{OfflineQueue, QueuedCall};
pub use registry::EventRegistry;
pub use router::Route;

use crate::error::ProtocolError;
use crate::protocol::Aria2Event;
use crate::transport::Transport;
use resocket::ConnectionState;
use serde_json::Value;

/// Outcome delivered to a completion handler
pub type Reply = std::result::Result<Value, ProtocolError>;

/// One-shot completion handler for a call
pub type Callback = Box<dyn FnOnce(Reply) + Send + 'static>;

/// Handler for a server notification, invoked with its `params`
pub type EventHandler = Box<dyn FnMut(Value) + Send + 'static>;

/// Box a closure as a completion handler for [`Session::send`]
pub fn callback(f: impl FnOnce(Reply) + Send + 'static) -> Option<Callback> {
    Some(Box::new(f))
}

/// One aria2 connection session
pub struct Session<T: Transport> {
    transport: T,
    token: Option<String>,
    state: ConnectionState,
    queue: OfflineQueue,
    pending: PendingCallbacks,
    events: EventRegistry,
}

impl<T: Transport> Session<T> {
    pub fn new(transport: T, token: Option<String>) -> Self {
        Self {
            transport,
            token,
            state: ConnectionState::Disconnected,
            queue: OfflineQueue::new(),
            pending: PendingCallbacks::new(),
            events: EventRegistry::new(),
        }
    }

    /// Register `handler` for `event`, replacing any earlier handler
    ///
    /// `event` accepts an [`Aria2Event`] or a case-insensitive name such as
    /// `"DownloadStart"` or `"error"`.
    pub fn on<F>(&mut self, event: impl Into<Aria2Event>, handler: F) -> &mut Self
    where
        F: FnMut(Value) + Send + 'static,
    {
        self.register(event.into(), Box::new(handler));
        self
    }

    /// Register an already boxed handler
    pub fn register(&mut self, event: Aria2Event, handler: EventHandler) {
        if self.events.on(event.clone(), handler) {
            tracing::debug!("Replaced handler for {}", event);
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_failed(&self) -> bool {
        self.state == ConnectionState::Failed
    }

    /// Calls waiting for the connection to open
    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    /// Calls sent with a handler and still awaiting their response
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Drop all queued calls, pending handlers and event handlers
    ///
    /// Dropped completion handlers are never invoked.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.pending.clear();
        self.events.clear();
    }
}

impl<T: Transport> std::fmt::Debug for Session<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("has_token", &self.token.is_some())
            .field("queue", &self.queue)
            .field("pending", &self.pending)
            .field("events", &self.events)
            .finish()
    }
}
