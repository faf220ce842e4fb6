//! Core traits and types shared by the socket implementation.
//!
//! - **ReconnectionStrategy**: decides how long to wait before the next attempt
//! - **SocketError**: everything that can go wrong on the wire

pub mod error;
pub mod reconnect;

pub use error::{Result, SocketError};
pub use reconnect::{ExponentialBackoff, FixedDelay, NeverReconnect, ReconnectionStrategy};
