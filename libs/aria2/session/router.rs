use super::Session;
use crate::error::{ProtocolError, SessionError};
use crate::protocol::{Aria2Event, InboundFrame};
use crate::transport::Transport;
use serde_json::Value;
use tracing::{debug, warn};

/// Where an inbound frame ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The error payload went to the registered `error` handler
    GenericError,
    /// The pending call with this id was completed
    Reply { id: String },
    /// The registered handler for this event ran
    Event(Aria2Event),
    /// Nothing was waiting for the frame
    Dropped,
}

impl<T: Transport> Session<T> {
    /// Route one inbound text frame
    ///
    /// In order of priority: an error payload goes to the generic `error`
    /// handler when one is registered, even if a call is waiting on the id;
    /// then a pending call with a matching id; then the handler for the
    /// notification method. Anything else is dropped.
    ///
    /// Valid JSON that is not an object is dropped. Text that is not JSON,
    /// or an object with mistyped fields, is returned as
    /// [`SessionError::MalformedMessage`] without touching any state.
    pub fn handle_message(&mut self, text: &str) -> Result<Route, SessionError> {
        let Some(frame) = InboundFrame::parse(text)? else {
            warn!("Dropping non-object frame: {}", text);
            return Ok(Route::Dropped);
        };
        debug!("← {}", text);

        let id = frame.correlation_id();
        let InboundFrame {
            result,
            error,
            method,
            params,
            ..
        } = frame;

        if let Some(payload) = &error {
            if self.events.contains(&Aria2Event::Error) {
                warn!("aria2 reported an error: {}", payload);
                let payload = payload.clone();
                self.events.dispatch(&Aria2Event::Error, payload);
                return Ok(Route::GenericError);
            }
        }

        if let Some(id) = id {
            if self.pending.contains(&id) {
                let reply = match error {
                    Some(payload) => Err(ProtocolError(payload)),
                    None => Ok(result.unwrap_or(Value::Null)),
                };
                self.pending.resolve(&id, reply);
                return Ok(Route::Reply { id });
            }
        }

        if let Some(method) = method {
            if let Some(event) = Aria2Event::from_method(&method) {
                if self.events.dispatch(&event, params.unwrap_or(Value::Null)) {
                    return Ok(Route::Event(event));
                }
            }
            debug!("No handler for {}, dropping notification", method);
            return Ok(Route::Dropped);
        }

        warn!("Dropping unmatched frame: {}", text);
        Ok(Route::Dropped)
    }
}
