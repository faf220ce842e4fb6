use super::{Callback, Reply};
use std::collections::HashMap;
use tracing::warn;

/// Completion handlers awaiting a response, keyed by correlation id
///
/// Entries are removed before their handler runs, so a handler can fire at
/// most once. Entries whose response never arrives stay until the session is
/// cleared.
#[derive(Default)]
pub struct PendingCallbacks {
    callbacks: HashMap<String, Callback>,
}

impl PendingCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: impl Into<String>, callback: Callback) {
        let id = id.into();
        if self.callbacks.insert(id.clone(), callback).is_some() {
            warn!("Replaced pending callback for duplicate id {}", id);
        }
    }

    /// Hand `reply` to the handler registered for `id`
    ///
    /// Returns `false` (and drops `reply`) when nothing is waiting on `id`.
    pub fn resolve(&mut self, id: &str, reply: Reply) -> bool {
        match self.callbacks.remove(id) {
            Some(callback) => {
                callback(reply);
                true
            }
            None => false,
        }
    }

    /// Forget a handler without invoking it
    pub fn withdraw(&mut self, id: &str) -> bool {
        self.callbacks.remove(id).is_some()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.callbacks.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn clear(&mut self) {
        self.callbacks.clear();
    }
}

impl std::fmt::Debug for PendingCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.callbacks.keys()).finish()
    }
}
