//! Common test utilities for aria2 integration tests
#![allow(dead_code)]

use aria2::{Reply, Session, Transport};
use parking_lot::Mutex;
use resocket::SocketError;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

/// Macro for verbose test output (controlled by TEST_VERBOSE env var)
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if std::env::var("TEST_VERBOSE").is_ok() {
            println!($($arg)*);
        }
    };
}

/// In-memory transport that records every frame it is handed
#[derive(Default)]
pub struct MockTransport {
    frames: Mutex<Vec<String>>,
    fail_sends: AtomicBool,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Sent frames, parsed
    pub fn frames(&self) -> Vec<Value> {
        self.frames
            .lock()
            .iter()
            .map(|frame| serde_json::from_str(frame).unwrap())
            .collect()
    }

    pub fn methods(&self) -> Vec<String> {
        self.frames()
            .iter()
            .map(|frame| frame["method"].as_str().unwrap().to_string())
            .collect()
    }

    /// Id of the `index`-th sent frame
    pub fn id_of(&self, index: usize) -> String {
        self.frames()[index]["id"].as_str().unwrap().to_string()
    }

    pub fn fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }
}

impl Transport for MockTransport {
    fn send(&self, frame: String) -> Result<(), SocketError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(SocketError::ChannelSend("socket task stopped".to_string()));
        }
        self.frames.lock().push(frame);
        Ok(())
    }
}

/// A session over a fresh mock transport, not yet open
pub fn session(token: Option<&str>) -> (Session<Arc<MockTransport>>, Arc<MockTransport>) {
    let transport = MockTransport::new();
    let session = Session::new(Arc::clone(&transport), token.map(str::to_string));
    (session, transport)
}

/// A session that has already seen its first open
pub fn open_session(token: Option<&str>) -> (Session<Arc<MockTransport>>, Arc<MockTransport>) {
    let (mut session, transport) = session(token);
    session.begin_connect();
    session.on_open();
    (session, transport)
}

/// Completion handler that stores every reply it receives
pub fn recording_callback() -> (Option<aria2::Callback>, Arc<Mutex<Vec<Reply>>>) {
    let replies = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&replies);
    (aria2::callback(move |reply| sink.lock().push(reply)), replies)
}

/// Event handler that stores every payload it receives
pub fn recording_handler() -> (impl FnMut(Value) + Send + 'static, Arc<Mutex<Vec<Value>>>) {
    let payloads = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&payloads);
    (move |payload| sink.lock().push(payload), payloads)
}

/// A WebSocket server that answers like aria2
///
/// Every request gets a result echoing its method and params, except
/// `aria2.fail` which gets an error. `aria2.addUri` is followed by an
/// `aria2.onDownloadStart` notification.
pub struct MockAria2Server {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<Value>>>,
    shutdown: Arc<Notify>,
}

pub const DOWNLOAD_GID: &str = "2089b05ecca3d829";

impl MockAria2Server {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Arc::new(Notify::new());
        let received = Arc::new(Mutex::new(Vec::new()));

        let shutdown_clone = shutdown.clone();
        let received_clone = received.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    result = listener.accept() => {
                        match result {
                            Ok((stream, _)) => {
                                let shutdown = shutdown_clone.clone();
                                let received = received_clone.clone();
                                tokio::spawn(async move {
                                    Self::handle_connection(stream, received, shutdown).await;
                                });
                            }
                            Err(e) => {
                                eprintln!("Accept error: {}", e);
                                break;
                            }
                        }
                    }
                    _ = shutdown_clone.notified() => {
                        break;
                    }
                }
            }
        });

        Self {
            addr,
            received,
            shutdown,
        }
    }

    fn respond(request: &Value) -> Vec<Value> {
        let id = request["id"].clone();
        let method = request["method"].as_str().unwrap_or_default();

        if method == "aria2.fail" {
            return vec![json!({
                "id": id,
                "jsonrpc": "2.0",
                "error": {"code": 1, "message": "boom"}
            })];
        }

        let mut frames = vec![json!({
            "id": id,
            "jsonrpc": "2.0",
            "result": {"method": method, "params": request["params"].clone()}
        })];
        if method == "aria2.addUri" {
            frames.push(json!({
                "jsonrpc": "2.0",
                "method": "aria2.onDownloadStart",
                "params": [{"gid": DOWNLOAD_GID}]
            }));
        }
        frames
    }

    async fn handle_connection(
        stream: tokio::net::TcpStream,
        received: Arc<Mutex<Vec<Value>>>,
        shutdown: Arc<Notify>,
    ) {
        use futures::{SinkExt, StreamExt};
        use tokio_tungstenite::{accept_async, tungstenite::Message};

        let ws_stream = match accept_async(stream).await {
            Ok(ws) => ws,
            Err(e) => {
                eprintln!("WebSocket handshake failed: {}", e);
                return;
            }
        };

        let (mut write, mut read) = ws_stream.split();

        loop {
            tokio::select! {
                msg = read.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            let request: Value = match serde_json::from_str(&text) {
                                Ok(request) => request,
                                Err(_) => continue,
                            };
                            received.lock().push(request.clone());
                            for frame in Self::respond(&request) {
                                if write.send(Message::Text(frame.to_string())).await.is_err() {
                                    return;
                                }
                            }
                        }
                        Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                        Some(Ok(_)) => {}
                    }
                }
                _ = shutdown.notified() => {
                    let _ = write.close().await;
                    break;
                }
            }
        }
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Requests received so far, in arrival order
    pub fn received(&self) -> Vec<Value> {
        self.received.lock().clone()
    }

    pub fn shutdown(&self) {
        self.shutdown.notify_waiters();
    }
}

impl Drop for MockAria2Server {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// URL of a local port with nothing listening on it
pub async fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("ws://{}", addr)
}
