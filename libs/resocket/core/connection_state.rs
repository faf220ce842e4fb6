//! Lock-free connection state and counters shared between the socket task
//! and its handle.

use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicU8, AtomicUsize, Ordering};

/// Lifecycle of a reconnecting connection
///
/// ```text
/// Disconnected ──> Connecting ──> Open ──> Retrying ──> Open
///                      │                      │
///                      └──────> Retrying      └──> Failed (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ConnectionState {
    Disconnected = 0,
    Connecting = 1,
    Open = 2,
    Retrying = 3,
    Failed = 4,
}

impl ConnectionState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => ConnectionState::Connecting,
            2 => ConnectionState::Open,
            3 => ConnectionState::Retrying,
            4 => ConnectionState::Failed,
            _ => ConnectionState::Disconnected,
        }
    }

    #[inline]
    pub fn is_open(self) -> bool {
        self == ConnectionState::Open
    }

    /// Failed is terminal: no transition leaves it
    #[inline]
    pub fn is_terminal(self) -> bool {
        self == ConnectionState::Failed
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Open => "open",
            ConnectionState::Retrying => "retrying",
            ConnectionState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Atomic wrapper around [`ConnectionState`]
#[derive(Debug)]
pub struct AtomicConnectionState(AtomicU8);

impl AtomicConnectionState {
    pub fn new(state: ConnectionState) -> Self {
        Self(AtomicU8::new(state as u8))
    }

    #[inline]
    pub fn get(&self) -> ConnectionState {
        ConnectionState::from_u8(self.0.load(Ordering::Acquire))
    }

    #[inline]
    pub fn set(&self, state: ConnectionState) {
        self.0.store(state as u8, Ordering::Release);
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.get().is_open()
    }

    /// True while an attempt is in flight or scheduled
    #[inline]
    pub fn is_connecting(&self) -> bool {
        matches!(self.get(), ConnectionState::Connecting | ConnectionState::Retrying)
    }

    #[inline]
    pub fn is_failed(&self) -> bool {
        self.get().is_terminal()
    }
}

/// Counters updated by the socket task
#[derive(Debug, Default)]
pub struct AtomicMetrics {
    messages_sent: AtomicU64,
    messages_received: AtomicU64,
    reconnect_count: AtomicU64,
    retry_count: AtomicUsize,
}

impl AtomicMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn increment_sent(&self) {
        self.messages_sent.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn increment_received(&self) {
        self.messages_received.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn increment_reconnects(&self) {
        self.reconnect_count.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn messages_sent(&self) -> u64 {
        self.messages_sent.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn messages_received(&self) -> u64 {
        self.messages_received.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn reconnect_count(&self) -> u64 {
        self.reconnect_count.load(Ordering::Relaxed)
    }

    /// Attempts made since the last successful open (0 for the first attempt)
    #[inline]
    pub fn retry_count(&self) -> usize {
        self.retry_count.load(Ordering::Acquire)
    }

    #[inline]
    pub fn set_retry_count(&self, count: usize) {
        self.retry_count.store(count, Ordering::Release);
    }
}
