//! # Initialization
//!
//! Host start-up: rustls setup, metrics registration, Key Vault connector
//! creation, HTTP server startup and readiness wait.
//!
//! Tracing is initialised by each binary before calling [`run`], so that
//! anything loaded ahead of it (such as a `.env` file) can influence the filter.

use crate::config::ServerConfig;
use crate::constants::{
    DEFAULT_FUNCTION_PORT, DEFAULT_WEB_PORT, FUNCTIONS_CUSTOMHANDLER_PORT_KEY, WEB_PORT_KEY,
};
use crate::handlers::AppState;
use crate::observability;
use crate::provider::azure::KeyVaultConnector;
use crate::server::{function_router, start_server, web_router, ServerState};
use anyhow::{anyhow, Context, Result};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Which deployable is being started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKind {
    /// Standalone web API returning masked secrets
    WebApi,
    /// Azure Functions custom handler returning full secret values
    FunctionHost,
}

impl HostKind {
    pub fn name(self) -> &'static str {
        match self {
            HostKind::WebApi => "web-api",
            HostKind::FunctionHost => "function-host",
        }
    }

    /// Environment variable carrying the listen port
    pub fn port_key(self) -> &'static str {
        match self {
            HostKind::WebApi => WEB_PORT_KEY,
            HostKind::FunctionHost => FUNCTIONS_CUSTOMHANDLER_PORT_KEY,
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            HostKind::WebApi => DEFAULT_WEB_PORT,
            HostKind::FunctionHost => DEFAULT_FUNCTION_PORT,
        }
    }

    pub fn router(self, state: AppState) -> Router {
        match self {
            HostKind::WebApi => web_router(state),
            HostKind::FunctionHost => function_router(state),
        }
    }

    /// Server configuration from the environment, `port_override` winning
    pub fn server_config(self, port_override: Option<u16>) -> ServerConfig {
        let mut config = ServerConfig::from_env(self.port_key(), self.default_port());
        if let Some(port) = port_override {
            config.port = port;
        }
        config
    }
}

/// Start `host` and serve until shutdown
///
/// This function handles:
/// - rustls crypto provider setup
/// - Metrics registration
/// - Key Vault connector creation
/// - HTTP server startup and readiness wait
pub async fn run(host: HostKind, port_override: Option<u16>) -> Result<()> {
    // Required for rustls 0.23+ when no default provider is set via features
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    info!(
        "Starting keyvault-demo {} v{}",
        host.name(),
        env!("CARGO_PKG_VERSION")
    );

    observability::metrics::register_metrics()?;

    let config = host.server_config(port_override);
    let connector = KeyVaultConnector::from_env(Duration::from_secs(config.keyvault_timeout_secs))
        .context("Failed to create Key Vault connector")?;
    let app = host.router(AppState::from_env(Arc::new(connector)));

    let server_state = Arc::new(ServerState::default());
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let mut server_handle = tokio::spawn(start_server(addr, app, Arc::clone(&server_state)));

    wait_for_server_ready(&server_state, &mut server_handle, &config).await?;

    match server_handle.await {
        Ok(result) => result,
        Err(e) => Err(anyhow!(e).context("HTTP server task failed")),
    }
}

/// Wait for the HTTP server to become ready
async fn wait_for_server_ready(
    server_state: &ServerState,
    server_handle: &mut JoinHandle<Result<()>>,
    config: &ServerConfig,
) -> Result<()> {
    let startup_timeout = Duration::from_secs(config.startup_timeout_secs);
    let poll_interval = Duration::from_millis(config.poll_interval_ms);
    let start_time = Instant::now();

    loop {
        // Server task ended before it was ready: surface its error
        if server_handle.is_finished() {
            return Err(match server_handle.await {
                Ok(Ok(())) => anyhow!("HTTP server exited before becoming ready"),
                Ok(Err(e)) => e.context("HTTP server failed to start"),
                Err(e) => anyhow!(e).context("HTTP server task failed"),
            });
        }

        if server_state.is_ready() {
            info!("HTTP server is ready and accepting connections");
            return Ok(());
        }

        if start_time.elapsed() > startup_timeout {
            return Err(anyhow!(
                "HTTP server failed to become ready within {} seconds",
                startup_timeout.as_secs()
            ));
        }

        tokio::time::sleep(poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_ports() {
        assert_eq!(HostKind::WebApi.port_key(), "PORT");
        assert_eq!(
            HostKind::FunctionHost.port_key(),
            "FUNCTIONS_CUSTOMHANDLER_PORT"
        );
        assert_eq!(HostKind::FunctionHost.default_port(), DEFAULT_FUNCTION_PORT);
    }

    #[test]
    fn test_port_override_wins() {
        let config = HostKind::WebApi.server_config(Some(18080));
        assert_eq!(config.port, 18080);
    }

    #[tokio::test]
    async fn test_wait_reports_bind_failure() {
        let mut handle: JoinHandle<Result<()>> =
            tokio::spawn(async { Err(anyhow!("address in use")) });
        let state = ServerState::default();
        let config = ServerConfig::with_port(0);

        let err = wait_for_server_ready(&state, &mut handle, &config)
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("address in use"));
    }

    #[tokio::test]
    async fn test_wait_returns_once_ready() {
        let mut handle: JoinHandle<Result<()>> = tokio::spawn(std::future::pending());
        let state = ServerState::default();
        state
            .is_ready
            .store(true, std::sync::atomic::Ordering::Relaxed);

        wait_for_server_ready(&state, &mut handle, &ServerConfig::with_port(0))
            .await
            .unwrap();
        handle.abort();
    }
}
