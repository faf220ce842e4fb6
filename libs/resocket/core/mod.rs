//! Reconnecting socket core.
//!
//! ## Example
//!
//! ```rust,ignore
//! use resocket::{ReconnectingSocket, SocketEvent};
//!
//! #[tokio::main]
//! async fn main() -> resocket::Result<()> {
//!     let socket = ReconnectingSocket::builder()
//!         .url("ws://localhost:6800/jsonrpc")
//!         .start()?;
//!
//!     let mut events = socket.take_events().expect("first consumer");
//!     socket.send(r#"{"jsonrpc":"2.0","method":"aria2.getVersion","id":"1"}"#)?;
//!
//!     while let Some(event) = events.recv().await {
//!         if let SocketEvent::Message(text) = event {
//!             println!("{}", text);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod client;
pub mod config;
pub mod connection_state;

pub use builder::{states, SocketBuilder};
pub use client::{Metrics, ReconnectingSocket, SocketEvent};
pub use config::{SocketConfig, DEFAULT_CONNECT_TIMEOUT, DEFAULT_MAX_RETRIES};
pub use connection_state::{AtomicConnectionState, AtomicMetrics, ConnectionState};

pub use crate::traits::*;
