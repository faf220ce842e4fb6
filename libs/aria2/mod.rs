//! # aria2
//!
//! JSON-RPC client for the aria2 download daemon over a reconnecting WebSocket.
//!
//! ## Architecture
//!
//! ```text
//! caller ──> SessionHandle ──cmd──> session task ──> Session::submit ──> Transport.send
//!                                        │                 └──> OfflineQueue (not open)
//!                                        │
//! resocket ──SocketEvent──> session task ├─ Open    ──> flush OfflineQueue in order
//!                                        ├─ Error   ──> retry budget check (fatal signal)
//!                                        ├─ Close   ──> Retrying
//!                                        └─ Message ──> Session::handle_message
//!                                                         ├─> EventRegistry[error]
//!                                                         ├─> PendingCallbacks[id]
//!                                                         └─> EventRegistry[method]
//! ```
//!
//! [`Session`] is the synchronous core and can be driven directly with any
//! [`Transport`]. [`Aria2Client`] confines one session to a tokio task and
//! feeds it from a [`resocket::ReconnectingSocket`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use aria2::{Aria2Client, Aria2Config, Aria2Event};
//! use serde_json::json;
//!
//! let client = Aria2Client::connect(&Aria2Config::new("ws://localhost:6800/jsonrpc"))?;
//! client
//!     .on(Aria2Event::DownloadComplete, |params| println!("done: {}", params))
//!     .on("error", |error| eprintln!("aria2 error: {}", error));
//!
//! let gid = client.call("addUri", Some(vec![json!(["https://example.com/file.iso"])])).await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod protocol;
pub mod session;
pub mod transport;

pub use client::{Aria2Client, SessionHandle, SessionStats};
pub use config::{Aria2Config, ConfigError, CONNECT_TIMEOUT, MAX_RETRIES};
pub use error::{ClientError, ProtocolError, SessionError};
pub use protocol::{Aria2Event, InboundFrame, RequestEnvelope, NAMESPACE};
pub use session::{
    callback, Callback, EventHandler, EventRegistry, OfflineQueue, PendingCallbacks, QueuedCall,
    Reply, Route, Session,
};
pub use transport::Transport;

pub use resocket::ConnectionState;

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
