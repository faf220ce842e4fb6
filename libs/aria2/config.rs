//! Client configuration
//!
//! Loaded from YAML, with `ARIA2_URL` and `ARIA2_TOKEN` (from the process
//! environment or a `.env` file) taking precedence over the file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// How long a single connection attempt may take
pub const CONNECT_TIMEOUT: Duration = Duration::from_millis(1000);

/// Reconnect attempts before the session gives up for good
pub const MAX_RETRIES: usize = 20;

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aria2Config {
    /// WebSocket endpoint, e.g. `ws://localhost:6800/jsonrpc`
    pub url: String,

    /// RPC secret (`--rpc-secret`), sent as `token:<secret>`
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Aria2Config {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: None,
            log_level: default_log_level(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Parse and validate a YAML document, without environment overrides
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: Aria2Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file, then apply `.env` and environment
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let yaml_content = std::fs::read_to_string(config_path)?;
        let mut config: Aria2Config = serde_yaml::from_str(&yaml_content)?;

        dotenv::dotenv().ok();
        config.apply_env_overrides();

        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("ARIA2_URL") {
            self.url = url;
        }
        if let Ok(token) = std::env::var("ARIA2_TOKEN") {
            self.token = Some(token);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.url.starts_with("ws://") || self.url.starts_with("wss://")) {
            return Err(ConfigError::ValidationError(format!(
                "url must start with ws:// or wss://, got '{}'",
                self.url
            )));
        }

        if let Some(token) = &self.token {
            if token.is_empty() {
                return Err(ConfigError::ValidationError(
                    "token must not be empty when set".to_string(),
                ));
            }
        }

        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "log_level must be one of {:?}, got '{}'",
                LOG_LEVELS, self.log_level
            )));
        }

        Ok(())
    }

    /// Log the effective configuration, with the token redacted
    pub fn log(&self) {
        info!("aria2 configuration:");
        info!("  url: {}", self.url);
        info!(
            "  token: {}",
            if self.token.is_some() { "<set>" } else { "<none>" }
        );
        info!("  log_level: {}", self.log_level);
        info!("  connect_timeout: {:?}", CONNECT_TIMEOUT);
        info!("  max_retries: {}", MAX_RETRIES);
    }
}
