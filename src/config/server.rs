//! # Server Configuration
//!
//! HTTP server settings loaded from environment variables.

use crate::constants::{
    DEFAULT_KEYVAULT_TIMEOUT_SECS, DEFAULT_SERVER_POLL_INTERVAL_MS,
    DEFAULT_SERVER_STARTUP_TIMEOUT_SECS, KEYVAULT_TIMEOUT_SECS_KEY,
};

/// HTTP server configuration
///
/// All settings have sensible defaults and can be overridden via environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// HTTP listen port
    pub port: u16,
    /// Server startup timeout (seconds)
    /// How long to wait for server to be ready before giving up
    pub startup_timeout_secs: u64,
    /// Server readiness poll interval (milliseconds)
    pub poll_interval_ms: u64,
    /// Timeout applied to each outbound Key Vault request (seconds)
    pub keyvault_timeout_secs: u64,
}

impl ServerConfig {
    /// Defaults with the given port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            startup_timeout_secs: DEFAULT_SERVER_STARTUP_TIMEOUT_SECS,
            poll_interval_ms: DEFAULT_SERVER_POLL_INTERVAL_MS,
            keyvault_timeout_secs: DEFAULT_KEYVAULT_TIMEOUT_SECS,
        }
    }

    /// Load configuration from environment variables with defaults
    ///
    /// `port_key` differs per host: `PORT` for the web API and
    /// `FUNCTIONS_CUSTOMHANDLER_PORT` for the function host.
    pub fn from_env(port_key: &str, default_port: u16) -> Self {
        Self {
            port: env_var_or_default(port_key, default_port),
            startup_timeout_secs: env_var_or_default(
                "SERVER_STARTUP_TIMEOUT_SECS",
                DEFAULT_SERVER_STARTUP_TIMEOUT_SECS,
            ),
            poll_interval_ms: env_var_or_default(
                "SERVER_POLL_INTERVAL_MS",
                DEFAULT_SERVER_POLL_INTERVAL_MS,
            ),
            keyvault_timeout_secs: env_var_or_default(
                KEYVAULT_TIMEOUT_SECS_KEY,
                DEFAULT_KEYVAULT_TIMEOUT_SECS,
            ),
        }
    }
}

/// Read environment variable or return default value
fn env_var_or_default<T: std::str::FromStr>(key: &str, default: T) -> T
where
    <T as std::str::FromStr>::Err: std::fmt::Debug,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
