//! aria2 console
//!
//! With arguments, performs one call and prints the result:
//!
//! ```text
//! aria2-console addUri '["https://example.com/file.iso"]'
//! ```
//!
//! Without arguments, logs every aria2 notification until Ctrl+C. Exits with
//! an error once the daemon stays unreachable for the whole retry budget.

use anyhow::{bail, Context, Result};
use aria2_ws::aria2::{logging::init_tracing, Aria2Client, Aria2Config, Aria2Event};
use aria2_ws::bin_common::{
    load_config_from_env, parse_args, parse_call, BinaryRunner, ConfigType,
};
use serde_json::Value;
use std::time::Duration;
use tracing::{error, info, warn};

const HEARTBEAT: Duration = Duration::from_secs(60);

const WATCHED_EVENTS: [Aria2Event; 7] = [
    Aria2Event::DownloadStart,
    Aria2Event::DownloadPause,
    Aria2Event::DownloadStop,
    Aria2Event::DownloadComplete,
    Aria2Event::DownloadError,
    Aria2Event::BtDownloadComplete,
    Aria2Event::Error,
];

struct ConsoleApp {
    client: Aria2Client,
    call: Option<(String, Vec<Value>)>,
}

impl ConsoleApp {
    fn new(client: Aria2Client, call: Option<(String, Vec<Value>)>) -> Self {
        Self { client, call }
    }

    async fn run_call(&self, method: &str, params: Vec<Value>) -> Result<()> {
        let params = if params.is_empty() { None } else { Some(params) };

        tokio::select! {
            result = self.client.call(method, params) => {
                let result = result.with_context(|| format!("aria2.{} failed", method))?;
                println!("{}", serde_json::to_string_pretty(&result)?);
                Ok(())
            }
            true = self.client.wait_fatal() => {
                bail!("aria2 is unreachable at {}", self.client.url())
            }
        }
    }

    async fn watch(&self) -> Result<()> {
        for event in WATCHED_EVENTS {
            let name = event.to_string();
            self.client.on(event, move |params| info!("{}: {}", name, params));
        }

        self.client.send(
            "getVersion",
            None,
            aria2_ws::aria2::callback(move |reply| match reply {
                Ok(version) => info!("aria2 version: {}", version["version"]),
                Err(e) => warn!("getVersion failed: {}", e),
            }),
        );

        let mut heartbeat = tokio::time::interval(HEARTBEAT);
        heartbeat.tick().await;

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Ctrl+C received");
                    return Ok(());
                }
                true = self.client.wait_fatal() => {
                    bail!("aria2 is unreachable at {}", self.client.url());
                }
                _ = heartbeat.tick() => {
                    match self.client.stats().await {
                        Ok(stats) => info!(
                            "Heartbeat: {} ({} pending, {} queued)",
                            self.client.state(), stats.pending, stats.queued
                        ),
                        Err(e) => warn!("Heartbeat failed: {}", e),
                    }
                }
            }
        }
    }
}

impl BinaryRunner for ConsoleApp {
    fn name(&self) -> &str {
        "aria2 console"
    }

    async fn run(&mut self) -> Result<()> {
        match self.call.take() {
            Some((method, params)) => self.run_call(&method, params).await,
            None => self.watch().await,
        }
    }

    fn stats(&self) -> Option<String> {
        let metrics = self.client.socket_metrics();
        Some(format!(
            "Frames sent: {}, received: {}, reconnects: {}",
            metrics.messages_sent, metrics.messages_received, metrics.reconnect_count
        ))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load config first (before logging is initialized)
    let config_path = load_config_from_env(ConfigType::Aria2);
    let config = Aria2Config::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    init_tracing(&config.log_level);
    config.log();

    let call = parse_call(&parse_args());
    let client = Aria2Client::connect(&config)?;
    let mut app = ConsoleApp::new(client, call);

    let result = app.execute().await;
    app.client.shutdown().await;

    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}
