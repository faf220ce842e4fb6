//! CLI utilities for binaries
//!
//! Handles configuration path lookup and command line parsing
//! for all binary executables.

use serde_json::Value;
use std::path::PathBuf;

/// Type of configuration to load
#[derive(Debug, Clone)]
pub enum ConfigType {
    /// Client configuration (config/aria2.yaml)
    Aria2,
    /// Custom path
    Custom(String),
}

impl ConfigType {
    /// Get the default path for this config type
    pub fn default_path(&self) -> &str {
        match self {
            ConfigType::Aria2 => "config/aria2.yaml",
            ConfigType::Custom(path) => path,
        }
    }

    /// Get the environment variable name for this config type
    pub fn env_var_name(&self) -> &str {
        match self {
            ConfigType::Aria2 => "ARIA2_CONFIG_PATH",
            ConfigType::Custom(_) => "CONFIG_PATH",
        }
    }
}

/// Load configuration path from environment or use default
///
/// # Examples
/// ```
/// use aria2_ws::bin_common::{load_config_from_env, ConfigType};
///
/// let path = load_config_from_env(ConfigType::Aria2);
/// ```
pub fn load_config_from_env(config_type: ConfigType) -> PathBuf {
    std::env::var(config_type.env_var_name())
        .unwrap_or_else(|_| config_type.default_path().to_string())
        .into()
}

/// Parse command line arguments for a binary
///
/// Returns a vector of arguments (excluding the program name)
pub fn parse_args() -> Vec<String> {
    std::env::args().skip(1).collect()
}

/// Turn `<method> [param...]` into an unprefixed method and its params
///
/// Each param is read as JSON when it parses, as a plain string otherwise,
/// so `addUri '["http://host/file"]'` and `remove 2089b05ecca3d829` both work.
pub fn parse_call(args: &[String]) -> Option<(String, Vec<Value>)> {
    let (method, params) = args.split_first()?;
    let method = method.strip_prefix("aria2.").unwrap_or(method).to_string();
    let params = params
        .iter()
        .map(|arg| serde_json::from_str(arg).unwrap_or_else(|_| Value::String(arg.clone())))
        .collect();
    Some((method, params))
}
