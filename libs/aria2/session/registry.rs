use super::EventHandler;
use crate::protocol::Aria2Event;
use serde_json::Value;
use std::collections::HashMap;

/// One handler slot per event
#[derive(Default)]
pub struct EventRegistry {
    handlers: HashMap<Aria2Event, EventHandler>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `handler` for `event`, returning `true` if it replaced one
    pub fn on(&mut self, event: Aria2Event, handler: EventHandler) -> bool {
        self.handlers.insert(event, handler).is_some()
    }

    /// Run the handler for `event`, if any
    pub fn dispatch(&mut self, event: &Aria2Event, payload: Value) -> bool {
        match self.handlers.get_mut(event) {
            Some(handler) => {
                handler(payload);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, event: &Aria2Event) -> bool {
        self.handlers.contains_key(event)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl std::fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set()
            .entries(self.handlers.keys().map(Aria2Event::key))
            .finish()
    }
}
