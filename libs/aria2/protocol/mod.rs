//! aria2 JSON-RPC wire format.
//!
//! Outgoing requests are text frames of the form
//!
//! ```text
//! { "jsonrpc": "2.0", "method": "aria2.<method>", "id": "<uuid>", "params": ["token:<t>", ...] }
//! ```
//!
//! Inbound frames are responses (`id` + `result` or `error`) or server
//! notifications (`method` = `aria2.on<event>`, `params`).

pub mod envelope;
pub mod events;

pub use envelope::{InboundFrame, RequestEnvelope};
pub use events::Aria2Event;

/// Namespace prepended to every method and event name
pub const NAMESPACE: &str = "aria2";

/// JSON-RPC protocol version carried by every request
pub const JSONRPC_VERSION: &str = "2.0";

/// Lowercase prefix of every notification method (`aria2.on`)
pub const EVENT_PREFIX: &str = "aria2.on";

/// Fully-qualified method name, e.g. `addUri` -> `aria2.addUri`
pub fn qualify(method: &str) -> String {
    format!("{}.{}", NAMESPACE, method)
}
