use super::Callback;
use serde_json::Value;
use std::collections::VecDeque;
use std::fmt;

/// A call submitted while the connection was not open
///
/// Holds the unprefixed method name; the envelope and its id are only built
/// when the call is finally dispatched.
pub struct QueuedCall {
    pub method: String,
    pub params: Option<Vec<Value>>,
    pub callback: Option<Callback>,
}

impl QueuedCall {
    pub fn new(method: impl Into<String>, params: Option<Vec<Value>>, callback: Option<Callback>) -> Self {
        Self {
            method: method.into(),
            params,
            callback,
        }
    }
}

impl fmt::Debug for QueuedCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueuedCall")
            .field("method", &self.method)
            .field("params", &self.params)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

/// FIFO buffer of calls waiting for the connection to open
#[derive(Debug, Default)]
pub struct OfflineQueue {
    calls: VecDeque<QueuedCall>,
}

impl OfflineQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a call behind everything already queued
    pub fn enqueue(&mut self, call: QueuedCall) {
        self.calls.push_back(call);
    }

    /// Remove and return the oldest call
    pub fn pop_oldest(&mut self) -> Option<QueuedCall> {
        self.calls.pop_front()
    }

    /// Yield calls oldest first, removing each one before it is handed out
    ///
    /// The queue is checked again on every step, so it ends empty rather than
    /// at the length it had when the drain started.
    pub fn drain(&mut self) -> impl Iterator<Item = QueuedCall> + '_ {
        std::iter::from_fn(move || self.calls.pop_front())
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}
