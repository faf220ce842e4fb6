use super::{Callback, QueuedCall, Session};
use crate::error::SessionError;
use crate::protocol::RequestEnvelope;
use crate::transport::Transport;
use serde_json::Value;
use tracing::{debug, error, info};

impl<T: Transport> Session<T> {
    /// Call an aria2 method
    ///
    /// `method` is unprefixed (`"addUri"`, not `"aria2.addUri"`). When the
    /// session is open the request goes out immediately; otherwise it waits in
    /// the offline queue and gets its id when the connection opens.
    pub fn send(
        &mut self,
        method: &str,
        params: Option<Vec<Value>>,
        callback: Option<Callback>,
    ) -> &mut Self {
        self.submit(QueuedCall::new(method, params, callback))
    }

    /// Send `call` now if the session is open, queue it otherwise
    pub fn submit(&mut self, call: QueuedCall) -> &mut Self {
        if self.state.is_open() {
            self.dispatch(call);
        } else {
            debug!("Connection {}, queueing {}", self.state, call.method);
            self.queue.enqueue(call);
        }
        self
    }

    fn dispatch(&mut self, call: QueuedCall) {
        let QueuedCall {
            method,
            params,
            callback,
        } = call;

        let request = RequestEnvelope::new(&method, params, self.token.as_deref());
        let frame = match request.to_frame() {
            Ok(frame) => frame,
            Err(e) => {
                error!("{}", SessionError::Encode(e));
                return;
            }
        };

        info!("→ {}", request.method());
        debug!("→ {}", frame);

        if let Some(callback) = callback {
            self.pending.register(request.id(), callback);
        }

        if let Err(e) = self.transport.send(frame) {
            self.pending.withdraw(request.id());
            error!("Failed to send {}: {}", request.method(), e);
        }
    }
}
