use super::Session;
use crate::config::MAX_RETRIES;
use crate::error::SessionError;
use crate::transport::Transport;
use resocket::ConnectionState;
use tracing::{debug, error, info, warn};

impl<T: Transport> Session<T> {
    /// Mark the first connection attempt as started
    pub fn begin_connect(&mut self) {
        if self.state == ConnectionState::Disconnected {
            self.state = ConnectionState::Connecting;
        }
    }

    /// The transport connected: open the session and flush the offline queue
    ///
    /// The session is open before the first queued call goes out, so nothing
    /// submitted from here on can land behind the flush.
    pub fn on_open(&mut self) {
        if self.is_failed() {
            warn!("Ignoring open notification on a failed session");
            return;
        }

        info!("Connected to aria2");
        self.state = ConnectionState::Open;

        let mut queued = std::mem::take(&mut self.queue);
        if !queued.is_empty() {
            info!("Flushing {} queued calls", queued.len());
        }
        for call in queued.drain() {
            self.submit(call);
        }
    }

    /// The transport failed to connect or lost the connection
    ///
    /// `attempt` is the transport's retry counter when the failure happened,
    /// not when it is handled. Returns [`SessionError::RetryExhausted`] once,
    /// for the failure of attempt [`MAX_RETRIES`]. The session is terminal
    /// from then on and ignores further errors.
    pub fn on_error(&mut self, reason: &str, attempt: usize) -> Result<(), SessionError> {
        if self.is_failed() {
            debug!("Ignoring error on a failed session: {}", reason);
            return Ok(());
        }

        if attempt >= MAX_RETRIES {
            error!(
                "Unable to reach aria2 after {} attempts, giving up: {}",
                attempt, reason
            );
            self.state = ConnectionState::Failed;
            return Err(SessionError::RetryExhausted { attempts: attempt });
        }

        error!(
            "aria2 connection error (attempt {}/{}): {}",
            attempt, MAX_RETRIES, reason
        );
        self.state = ConnectionState::Retrying;
        Ok(())
    }

    /// The connection ended; later calls queue until the next open
    pub fn on_close(&mut self) {
        if self.is_failed() {
            return;
        }
        warn!("Disconnected from aria2");
        self.state = ConnectionState::Retrying;
    }
}
