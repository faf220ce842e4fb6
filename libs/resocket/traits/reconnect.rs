use std::time::Duration;

/// Trait for defining how long to wait between reconnection attempts
///
/// The retry budget itself lives in [`SocketConfig`](crate::SocketConfig);
/// a strategy only spaces the attempts out, or refuses further attempts by
/// returning `None`.
pub trait ReconnectionStrategy: Send + Sync {
    /// Get the delay before reconnection attempt number `attempt` (1-based)
    ///
    /// # Returns
    /// * `Some(duration)` - Wait this long before reconnecting
    /// * `None` - Stop reconnecting
    fn next_delay(&self, attempt: usize) -> Option<Duration>;
}

/// Exponential backoff reconnection strategy
///
/// Delays grow geometrically: `initial_delay * factor^(attempt - 1)`, capped at
/// `max_delay`.
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    initial_delay: Duration,
    max_delay: Duration,
    factor: f64,
}

impl ExponentialBackoff {
    /// Create a new exponential backoff strategy that doubles on every attempt
    ///
    /// # Arguments
    /// * `initial_delay` - The delay before the first reconnect
    /// * `max_delay` - The maximum delay between reconnects
    pub fn new(initial_delay: Duration, max_delay: Duration) -> Self {
        Self {
            initial_delay,
            max_delay,
            factor: 2.0,
        }
    }

    /// Override the growth factor (values below 1.0 are clamped to 1.0)
    pub fn with_factor(mut self, factor: f64) -> Self {
        self.factor = factor.max(1.0);
        self
    }
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), Duration::from_secs(10)).with_factor(1.3)
    }
}

impl ReconnectionStrategy for ExponentialBackoff {
    fn next_delay(&self, attempt: usize) -> Option<Duration> {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as usize) as i32;
        let millis = self.initial_delay.as_millis() as f64 * self.factor.powi(exponent);
        let capped = millis.min(self.max_delay.as_millis() as f64);
        Some(Duration::from_millis(capped as u64))
    }
}

/// Fixed delay reconnection strategy
#[derive(Debug, Clone)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl ReconnectionStrategy for FixedDelay {
    fn next_delay(&self, _attempt: usize) -> Option<Duration> {
        Some(self.delay)
    }
}

/// Never reconnect strategy
///
/// The socket gives up after the first failed or lost connection
#[derive(Debug, Clone)]
pub struct NeverReconnect;

impl ReconnectionStrategy for NeverReconnect {
    fn next_delay(&self, _attempt: usize) -> Option<Duration> {
        None
    }
}
