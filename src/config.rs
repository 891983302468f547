//! Configuration loading and constants.
//!
//! Loads the probe configuration from a YAML file. `Config` is immutable once
//! loaded; fields are plain strings and are only interpreted when a check
//! opens a connection or the server binds its listener.

use const_format::formatcp;
use serde::{Deserialize, Serialize};
use std::path::Path;

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config.yml";

/// Tracing target of this crate
const CRATE_TARGET: &str = "mysql_check";

/// Default log filter when neither `--log-level` nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = formatcp!("{}=info", CRATE_TARGET);

/// Default log filter in debug mode
pub const DEBUG_LOG_FILTER: &str = formatcp!("{}=debug,tower_http=debug", CRATE_TARGET);

// =============================================================================
// MySQL Constants
// =============================================================================

/// Host dialed when `mysql_address` has no host
pub const DEFAULT_MYSQL_HOST: &str = "127.0.0.1";

/// Port used when `mysql_address` has no explicit port
pub const DEFAULT_MYSQL_PORT: u16 = 3306;

/// Scalar query reporting whether the server rejects writes
pub const READ_ONLY_QUERY: &str = "SELECT @@global.read_only";

// =============================================================================
// HTTP Constants
// =============================================================================

/// Seconds to wait for in-flight probes after a shutdown signal
pub const SHUTDOWN_GRACE_SECS: u64 = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// MySQL server address, `host:port`
    #[serde(default)]
    pub mysql_address: String,
    /// Connection timeout in seconds
    #[serde(default)]
    pub mysql_timeout: String,
    /// Credentials in `user:password` form
    #[serde(default)]
    pub mysql_user_password: String,
    /// Listen address for the probe endpoint, `host:port` or `:port`
    #[serde(default)]
    pub http_address: String,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        // An empty document deserializes as unit, not as a mapping
        let config: Option<Config> = serde_yaml_ng::from_str(&contents)?;
        Ok(config.unwrap_or_default())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
}
