//! The task that owns a [`Session`]
//!
//! Socket notifications and host commands are applied to the session one at
//! a time, so the queue and both registries need no locking.

use crate::protocol::Aria2Event;
use crate::session::{EventHandler, QueuedCall, Session};
use crate::transport::Transport;
use resocket::{AtomicConnectionState, SocketEvent};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::{oneshot, watch};
use tracing::{debug, error, info};

/// Requests from host code to the session task
pub(crate) enum SessionCommand {
    Send(QueuedCall),
    On(Aria2Event, EventHandler),
    Stats(oneshot::Sender<SessionStats>),
    Shutdown,
}

/// Snapshot of a running session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    /// Calls waiting for the connection to open
    pub queued: usize,
    /// Calls awaiting their response
    pub pending: usize,
}

/// Drive `session` until shutdown or until the socket stops
///
/// Socket events win over commands when both are ready, so a call submitted
/// right after a disconnect sees the session already retrying.
pub(crate) async fn run_session<T: Transport>(
    mut session: Session<T>,
    mut events: UnboundedReceiver<SocketEvent>,
    mut commands: UnboundedReceiver<SessionCommand>,
    state: Arc<AtomicConnectionState>,
    fatal_tx: watch::Sender<bool>,
) {
    state.set(session.state());

    loop {
        tokio::select! {
            biased;

            event = events.recv() => {
                let Some(event) = event else {
                    debug!("Socket event stream ended");
                    break;
                };

                match event {
                    SocketEvent::Open => session.on_open(),
                    SocketEvent::Message(text) => {
                        if let Err(e) = session.handle_message(&text) {
                            error!("Discarding inbound frame: {}", e);
                        }
                    }
                    SocketEvent::Error { reason, attempt } => {
                        if let Err(e) = session.on_error(&reason, attempt) {
                            error!("{}", e);
                            let _ = fatal_tx.send(true);
                        }
                    }
                    SocketEvent::Close => session.on_close(),
                }
            }

            command = commands.recv() => {
                match command {
                    Some(SessionCommand::Send(call)) => {
                        session.submit(call);
                    }
                    Some(SessionCommand::On(event, handler)) => {
                        session.register(event, handler);
                    }
                    Some(SessionCommand::Stats(reply)) => {
                        let _ = reply.send(SessionStats {
                            queued: session.queued_count(),
                            pending: session.pending_count(),
                        });
                    }
                    Some(SessionCommand::Shutdown) | None => {
                        debug!("Session shutdown requested");
                        break;
                    }
                }
            }
        }

        state.set(session.state());
    }

    if session.pending_count() > 0 || session.queued_count() > 0 {
        info!(
            "Session closing with {} pending and {} queued calls",
            session.pending_count(),
            session.queued_count()
        );
    }
    session.clear();
    state.set(session.state());
    info!("Session task exiting");
}
