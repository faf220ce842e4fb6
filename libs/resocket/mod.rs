//! # resocket
//!
//! A persistent WebSocket connection that reconnects on its own.
//!
//! ## Features
//!
//! - **Lifecycle notifications**: open, message, error and close are delivered as
//!   [`SocketEvent`]s on an unbounded channel, in the order they happened
//! - **Bounded retries**: a retry counter that resets on every successful open and
//!   stops the socket once the configured budget is spent
//! - **Connection timeout**: each attempt is abandoned after a fixed duration
//! - **Type-state builder**: the URL must be set before the socket can be started
//! - **Buffered sends**: frames sent while disconnected wait for the next connection

pub mod core;
pub mod traits;

pub use traits::*;

pub use self::core::{
    builder, client, config, connection_state,
    builder::{states, SocketBuilder},
    client::{Metrics, ReconnectingSocket, SocketEvent},
    config::{SocketConfig, DEFAULT_CONNECT_TIMEOUT, DEFAULT_MAX_RETRIES},
    connection_state::{AtomicConnectionState, AtomicMetrics, ConnectionState},
};
