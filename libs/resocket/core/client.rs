use crate::config::SocketConfig;
use crate::connection_state::{AtomicConnectionState, AtomicMetrics, ConnectionState};
use crate::traits::*;
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, info, warn};

/// How often blocking waits re-check the running flag
const RUNNING_CHECK_INTERVAL: Duration = Duration::from_millis(100);

type WsStream = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

/// Internal command messages for socket control
#[derive(Debug)]
enum SocketCommand {
    /// Send a text frame
    Send(String),
    /// Close the active connection and stop
    Close,
}

/// Lifecycle notifications emitted by the socket task, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketEvent {
    /// A connection was established
    Open,
    /// A text frame arrived
    Message(String),
    /// A connection attempt failed or the active connection broke
    ///
    /// `attempt` is the retry counter at the moment of failure: `0` for the
    /// first attempt after an open, up to the configured `max_retries`.
    Error { reason: String, attempt: usize },
    /// The active connection ended
    Close,
}

/// Socket metrics snapshot
#[derive(Debug, Clone)]
pub struct Metrics {
    pub messages_sent: u64,
    pub messages_received: u64,
    pub reconnect_count: u64,
    pub retry_count: usize,
    pub connection_state: ConnectionState,
}

/// A WebSocket connection that reconnects until its retry budget is spent
///
/// The connection is driven by a dedicated tokio task. Frames handed to
/// [`send`](Self::send) while the connection is down stay in the command
/// channel and go out once a connection is open again.
pub struct ReconnectingSocket {
    config: Arc<SocketConfig>,
    state: Arc<AtomicConnectionState>,
    metrics: Arc<AtomicMetrics>,
    command_tx: UnboundedSender<SocketCommand>,
    event_rx: Mutex<Option<UnboundedReceiver<SocketEvent>>>,
    task_handle: Mutex<Option<tokio::task::JoinHandle<()>>>,
}

impl ReconnectingSocket {
    /// Start building a socket
    pub fn builder() -> crate::SocketBuilder<crate::states::NoUrl> {
        crate::SocketBuilder::new()
    }

    pub(crate) fn start(config: SocketConfig) -> Self {
        let config = Arc::new(config);
        let state = Arc::new(AtomicConnectionState::new(ConnectionState::Disconnected));
        let metrics = Arc::new(AtomicMetrics::new());

        let (command_tx, command_rx) = unbounded_channel();
        let (event_tx, event_rx) = unbounded_channel();

        let task_handle = {
            let config = Arc::clone(&config);
            let state = Arc::clone(&state);
            let metrics = Arc::clone(&metrics);

            tokio::spawn(async move {
                run_socket(config, state, metrics, command_rx, event_tx).await;
            })
        };

        Self {
            config,
            state,
            metrics,
            command_tx,
            event_rx: Mutex::new(Some(event_rx)),
            task_handle: Mutex::new(Some(task_handle)),
        }
    }

    /// Queue a text frame for the connection
    pub fn send(&self, text: impl Into<String>) -> Result<()> {
        self.command_tx
            .send(SocketCommand::Send(text.into()))
            .map_err(|e| SocketError::ChannelSend(e.to_string()))
    }

    /// Take the lifecycle event stream
    ///
    /// There is a single consumer; later calls return `None`.
    pub fn take_events(&self) -> Option<UnboundedReceiver<SocketEvent>> {
        self.event_rx.lock().take()
    }

    #[inline]
    pub fn state(&self) -> ConnectionState {
        self.state.get()
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Attempts made since the last successful open
    #[inline]
    pub fn retry_count(&self) -> usize {
        self.metrics.retry_count()
    }

    #[inline]
    pub fn max_retries(&self) -> usize {
        self.config.max_retries
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            messages_sent: self.metrics.messages_sent(),
            messages_received: self.metrics.messages_received(),
            reconnect_count: self.metrics.reconnect_count(),
            retry_count: self.metrics.retry_count(),
            connection_state: self.state.get(),
        }
    }

    /// Stop reconnecting, close the active connection and wait for the task
    pub async fn shutdown(&self) {
        info!("Shutting down socket to {}", self.config.url);
        self.config.running.store(false, Ordering::Release);
        let _ = self.command_tx.send(SocketCommand::Close);

        let handle = self.task_handle.lock().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}

impl Drop for ReconnectingSocket {
    fn drop(&mut self) {
        self.config.running.store(false, Ordering::Release);
    }
}

/// Main socket task loop
async fn run_socket(
    config: Arc<SocketConfig>,
    state: Arc<AtomicConnectionState>,
    metrics: Arc<AtomicMetrics>,
    mut command_rx: UnboundedReceiver<SocketCommand>,
    event_tx: UnboundedSender<SocketEvent>,
) {
    let running = &config.running;
    let mut attempt = 0usize;

    loop {
        if !running.load(Ordering::Acquire) {
            debug!("Running flag cleared, exiting socket loop");
            state.set(ConnectionState::Disconnected);
            break;
        }

        state.set(if attempt == 0 {
            ConnectionState::Connecting
        } else {
            ConnectionState::Retrying
        });
        metrics.set_retry_count(attempt);

        match connect(&config).await {
            Ok(ws_stream) => {
                info!("Connected to {}", config.url);
                attempt = 0;
                metrics.set_retry_count(0);
                state.set(ConnectionState::Open);
                let _ = event_tx.send(SocketEvent::Open);

                if let Err(e) = message_loop(ws_stream, &config, &metrics, &mut command_rx, &event_tx).await {
                    warn!("Connection to {} lost: {}", config.url, e);
                    let _ = event_tx.send(SocketEvent::Error {
                        reason: e.to_string(),
                        attempt,
                    });
                }

                state.set(ConnectionState::Retrying);
                let _ = event_tx.send(SocketEvent::Close);
            }
            Err(e) => {
                error!("Failed to connect to {}: {}", config.url, e);
                let _ = event_tx.send(SocketEvent::Error {
                    reason: e.to_string(),
                    attempt,
                });
            }
        }

        if !running.load(Ordering::Acquire) {
            state.set(ConnectionState::Disconnected);
            break;
        }

        if attempt >= config.max_retries {
            warn!("Retry budget of {} attempts spent, giving up", config.max_retries);
            state.set(ConnectionState::Failed);
            break;
        }

        attempt += 1;
        let Some(delay) = config.reconnect_strategy.next_delay(attempt) else {
            warn!("Reconnection strategy exhausted, giving up");
            state.set(ConnectionState::Failed);
            break;
        };

        state.set(ConnectionState::Retrying);
        info!(
            "Reconnecting in {:?} (attempt {}/{})",
            delay, attempt, config.max_retries
        );

        if !interruptible_sleep(delay, &config).await {
            debug!("Running flag cleared during reconnection delay");
            state.set(ConnectionState::Disconnected);
            break;
        }
        metrics.increment_reconnects();
    }

    info!("Socket task exiting");
}

/// One connection attempt bounded by the configured timeout
async fn connect(config: &SocketConfig) -> Result<WsStream> {
    match tokio::time::timeout(config.connect_timeout, connect_async(config.url.as_str())).await {
        Ok(Ok((ws_stream, _))) => Ok(ws_stream),
        Ok(Err(e)) => Err(SocketError::WebSocket(e.to_string())),
        Err(_) => Err(SocketError::Timeout(config.connect_timeout)),
    }
}

/// Sleep for `delay`, returning `false` early if the running flag is cleared
async fn interruptible_sleep(delay: Duration, config: &SocketConfig) -> bool {
    let mut elapsed = Duration::ZERO;

    while elapsed < delay {
        if !config.running.load(Ordering::Acquire) {
            return false;
        }
        let sleep_time = std::cmp::min(RUNNING_CHECK_INTERVAL, delay - elapsed);
        tokio::time::sleep(sleep_time).await;
        elapsed += sleep_time;
    }

    config.running.load(Ordering::Acquire)
}

/// Pump frames in both directions until the connection ends
///
/// Returns `Ok(())` for an orderly close (either side) and `Err` when the
/// connection broke.
async fn message_loop(
    ws_stream: WsStream,
    config: &SocketConfig,
    metrics: &AtomicMetrics,
    command_rx: &mut UnboundedReceiver<SocketCommand>,
    event_tx: &UnboundedSender<SocketEvent>,
) -> Result<()> {
    let (mut write, mut read) = ws_stream.split();
    let mut ticker = tokio::time::interval(RUNNING_CHECK_INTERVAL);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        if !config.running.load(Ordering::Acquire) {
            debug!("Running flag cleared in message loop, closing connection");
            let _ = write.close().await;
            return Ok(());
        }

        tokio::select! {
            msg = read.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        metrics.increment_received();
                        let _ = event_tx.send(SocketEvent::Message(text));
                    }
                    Some(Ok(Message::Binary(data))) => {
                        metrics.increment_received();
                        match String::from_utf8(data) {
                            Ok(text) => {
                                let _ = event_tx.send(SocketEvent::Message(text));
                            }
                            Err(_) => debug!("Dropping non UTF-8 binary frame"),
                        }
                    }
                    Some(Ok(Message::Close(frame))) => {
                        debug!("Server closed the connection: {:?}", frame);
                        return Ok(());
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        return Err(SocketError::WebSocket(e.to_string()));
                    }
                    None => {
                        return Err(SocketError::ConnectionClosed("stream ended".into()));
                    }
                }
            }

            cmd = command_rx.recv() => {
                match cmd {
                    Some(SocketCommand::Send(text)) => {
                        write.send(Message::Text(text)).await.map_err(|e| {
                            SocketError::WebSocket(format!("Failed to send frame: {}", e))
                        })?;
                        metrics.increment_sent();
                    }
                    Some(SocketCommand::Close) | None => {
                        debug!("Close requested, closing connection");
                        let _ = write.close().await;
                        return Ok(());
                    }
                }
            }

            _ = ticker.tick() => {}
        }
    }
}
