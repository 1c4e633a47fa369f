//! # Azure Key Vault Connector
//!
//! Builds a [`KeyVaultClient`] for the vault named in the request's settings.

use super::auth::{AmbientCredentialResolver, CredentialResolver};
use super::client::{construct_vault_url, KeyVaultClient};
use crate::constants::KEYVAULT_API_VERSION;
use crate::provider::{SecretStore, SecretStoreConnector, SecretStoreError};
use anyhow::{Context, Result};
use async_trait::async_trait;
use azure_core::http::{ClientOptions, RetryOptions, TransportOptions};
use azure_security_keyvault_secrets::SecretClientOptions;
use reqwest::Client as ReqwestClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Connects to Azure Key Vault instances on demand
///
/// The HTTP client and credential are shared between requests. Each
/// `connect` call yields a fresh client scoped to one vault. Requests are
/// never retried; the reqwest timeout bounds each call.
#[derive(Debug, Clone)]
pub struct KeyVaultConnector {
    http: Arc<ReqwestClient>,
    credentials: Arc<dyn CredentialResolver>,
}

impl KeyVaultConnector {
    pub fn new(http: ReqwestClient, credentials: Arc<dyn CredentialResolver>) -> Self {
        Self {
            http: Arc::new(http),
            credentials,
        }
    }

    /// Connector using the ambient credential chain and a request timeout
    pub fn from_env(timeout: Duration) -> Result<Self> {
        let http = ReqwestClient::builder()
            .user_agent(concat!("keyvault-demo/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self::new(http, Arc::new(AmbientCredentialResolver::from_env())))
    }

    fn client_options(&self) -> SecretClientOptions {
        let http: Arc<ReqwestClient> = Arc::clone(&self.http);
        SecretClientOptions {
            api_version: KEYVAULT_API_VERSION.to_owned(),
            client_options: ClientOptions {
                transport: Some(TransportOptions::new(http)),
                retry: Some(RetryOptions::none()),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

#[async_trait]
impl SecretStoreConnector for KeyVaultConnector {
    async fn connect(&self, vault_uri: &str) -> Result<Box<dyn SecretStore>, SecretStoreError> {
        let vault_url = construct_vault_url(vault_uri)?;
        let credential = self.credentials.resolve_credential().await?;
        debug!("Connecting to Key Vault at {}", vault_url);

        Ok(Box::new(KeyVaultClient::new(
            vault_url,
            credential,
            self.client_options(),
        )?))
    }
}
