//! aria2 WebSocket client - main library
//!
//! ## Architecture
//!
//! - **bin_common**: Common utilities for binary executables (CLI, runners)
//! - **aria2**: JSON-RPC session, async client, config (re-exported from workspace)
//! - **resocket**: Reconnecting WebSocket library (re-exported from workspace)
//!
//! ## Usage in Binaries
//!
//! ```rust,ignore
//! use aria2_ws::aria2::{Aria2Client, Aria2Config};
//! use aria2_ws::bin_common::{load_config_from_env, ConfigType};
//! ```

// Re-export workspace libraries for convenience
pub use aria2;
pub use resocket;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables

    pub mod cli;
    pub mod runner;

    pub use cli::{load_config_from_env, parse_args, parse_call, ConfigType};
    pub use runner::BinaryRunner;
}
