//! # Azure Key Vault Authentication
//!
//! Resolves the credential used to obtain Key Vault bearer tokens.
//!
//! Resolution order, read from a [`ConfigSource`]:
//! 1. `KEYVAULT_STATIC_TOKEN` - fixed token for local emulators and tests
//! 2. `AZURE_TENANT_ID` + `AZURE_CLIENT_ID` + `AZURE_CLIENT_SECRET` - service principal
//! 3. `AZURE_FEDERATED_TOKEN_FILE` + `AZURE_CLIENT_ID` - Workload Identity
//! 4. `IDENTITY_ENDPOINT` or `MSI_ENDPOINT` - Managed Identity (App Service, Functions)
//! 5. Managed Identity, falling back to the Azure CLI login on developer machines

use crate::config::{ConfigSource, EnvConfigSource};
use crate::constants::{
    AZURE_CLIENT_ID_KEY, AZURE_CLIENT_SECRET_KEY, AZURE_FEDERATED_TOKEN_FILE_KEY,
    AZURE_TENANT_ID_KEY, IDENTITY_ENDPOINT_KEY, KEYVAULT_STATIC_TOKEN_KEY, MSI_ENDPOINT_KEY,
};
use crate::provider::SecretStoreError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use azure_core::credentials::{AccessToken, Secret, TokenCredential, TokenRequestOptions};
use azure_core::error::ErrorKind;
use azure_identity::{
    AzureCliCredential, ClientSecretCredential, ManagedIdentityCredential,
    WorkloadIdentityCredential,
};
use std::fmt;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// TokenCredential that always returns the same bearer token
///
/// Used against local Key Vault emulators and mock servers where no Azure
/// identity is available.
pub struct StaticTokenCredential {
    token: String,
}

impl StaticTokenCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for StaticTokenCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticTokenCredential").finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenCredential for StaticTokenCredential {
    async fn get_token(
        &self,
        _scopes: &[&str],
        _options: Option<TokenRequestOptions<'_>>,
    ) -> azure_core::Result<AccessToken> {
        use typespec_client_core::time::{Duration, OffsetDateTime};

        Ok(AccessToken::new(
            Secret::new(self.token.clone()),
            OffsetDateTime::now_utc() + Duration::seconds(3600),
        ))
    }
}

/// Tries each credential in order and returns the first token obtained
pub struct FallbackCredential {
    sources: Vec<(&'static str, Arc<dyn TokenCredential>)>,
}

impl FallbackCredential {
    pub fn new(sources: Vec<(&'static str, Arc<dyn TokenCredential>)>) -> Self {
        Self { sources }
    }
}

impl fmt::Debug for FallbackCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.sources.iter().map(|(name, _)| *name).collect();
        f.debug_struct("FallbackCredential")
            .field("sources", &names)
            .finish()
    }
}

#[async_trait]
impl TokenCredential for FallbackCredential {
    async fn get_token(
        &self,
        scopes: &[&str],
        options: Option<TokenRequestOptions<'_>>,
    ) -> azure_core::Result<AccessToken> {
        let mut failures = Vec::with_capacity(self.sources.len());
        for (name, credential) in &self.sources {
            match credential.get_token(scopes, options.clone()).await {
                Ok(token) => return Ok(token),
                Err(e) => {
                    debug!("{} did not provide a token: {}", name, e);
                    failures.push(format!("{name}: {e}"));
                }
            }
        }

        warn!("No credential source provided a Key Vault token");
        Err(azure_core::Error::message(
            ErrorKind::Credential,
            format!("no credential source succeeded ({})", failures.join("; ")),
        ))
    }
}

/// Which credential the ambient environment calls for
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialKind {
    StaticToken(String),
    ClientSecret {
        tenant_id: String,
        client_id: String,
        client_secret: String,
    },
    WorkloadIdentity {
        client_id: String,
    },
    /// Hosted on Azure with an identity endpoint
    ManagedIdentity,
    /// No hint in the environment: Managed Identity, then the Azure CLI
    ManagedIdentityOrAzureCli,
}

impl fmt::Debug for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialKind::StaticToken(_) => f.write_str("StaticToken(<redacted>)"),
            CredentialKind::ClientSecret {
                tenant_id,
                client_id,
                ..
            } => f
                .debug_struct("ClientSecret")
                .field("tenant_id", tenant_id)
                .field("client_id", client_id)
                .field("client_secret", &"<redacted>")
                .finish(),
            CredentialKind::WorkloadIdentity { client_id } => f
                .debug_struct("WorkloadIdentity")
                .field("client_id", client_id)
                .finish(),
            CredentialKind::ManagedIdentity => f.write_str("ManagedIdentity"),
            CredentialKind::ManagedIdentityOrAzureCli => f.write_str("ManagedIdentityOrAzureCli"),
        }
    }
}

/// Pick the credential kind from configuration
pub fn select_credential_kind(source: &dyn ConfigSource) -> CredentialKind {
    let present = |key: &str| source.get(key).filter(|v| !v.trim().is_empty());

    if let Some(token) = present(KEYVAULT_STATIC_TOKEN_KEY) {
        return CredentialKind::StaticToken(token);
    }

    let client_id = present(AZURE_CLIENT_ID_KEY);

    if let (Some(tenant_id), Some(client_id), Some(client_secret)) = (
        present(AZURE_TENANT_ID_KEY),
        client_id.clone(),
        present(AZURE_CLIENT_SECRET_KEY),
    ) {
        return CredentialKind::ClientSecret {
            tenant_id,
            client_id,
            client_secret,
        };
    }

    if let (Some(_), Some(client_id)) = (present(AZURE_FEDERATED_TOKEN_FILE_KEY), client_id) {
        return CredentialKind::WorkloadIdentity { client_id };
    }

    if present(IDENTITY_ENDPOINT_KEY).is_some() || present(MSI_ENDPOINT_KEY).is_some() {
        CredentialKind::ManagedIdentity
    } else {
        CredentialKind::ManagedIdentityOrAzureCli
    }
}

/// Create the Azure credential for `kind`
fn create_credential(kind: &CredentialKind) -> Result<Arc<dyn TokenCredential>> {
    let credential: Arc<dyn TokenCredential> = match kind {
        CredentialKind::StaticToken(token) => {
            debug!("Using static Key Vault bearer token");
            Arc::new(StaticTokenCredential::new(token.clone()))
        }
        CredentialKind::ClientSecret {
            tenant_id,
            client_id,
            client_secret,
        } => {
            info!(
                "Using Azure service principal authentication with client ID: {}",
                client_id
            );
            ClientSecretCredential::new(
                tenant_id,
                client_id.clone(),
                Secret::new(client_secret.clone()),
                None,
            )
            .context("Failed to create ClientSecretCredential")?
        }
        CredentialKind::WorkloadIdentity { client_id } => {
            info!(
                "Using Azure Workload Identity authentication with client ID: {}",
                client_id
            );
            let options = azure_identity::WorkloadIdentityCredentialOptions {
                client_id: Some(client_id.clone()),
                ..Default::default()
            };
            WorkloadIdentityCredential::new(Some(options))
                .context("Failed to create WorkloadIdentityCredential")?
        }
        CredentialKind::ManagedIdentity => {
            info!("Identity endpoint present, using Managed Identity");
            ManagedIdentityCredential::new(None)
                .context("Failed to create ManagedIdentityCredential")?
        }
        CredentialKind::ManagedIdentityOrAzureCli => {
            info!("No identity configured, trying Managed Identity then Azure CLI");
            let managed: Arc<dyn TokenCredential> = ManagedIdentityCredential::new(None)
                .context("Failed to create ManagedIdentityCredential")?;
            let cli: Arc<dyn TokenCredential> =
                AzureCliCredential::new(None).context("Failed to create AzureCliCredential")?;
            Arc::new(FallbackCredential::new(vec![
                ("managed identity", managed),
                ("azure cli", cli),
            ]))
        }
    };

    Ok(credential)
}

/// Supplies the credential used to authenticate Key Vault calls
#[async_trait]
pub trait CredentialResolver: Send + Sync + fmt::Debug {
    async fn resolve_credential(&self) -> Result<Arc<dyn TokenCredential>, SecretStoreError>;
}

/// Resolves the credential from the hosting environment
///
/// The credential is built once and reused; it caches its own tokens.
pub struct AmbientCredentialResolver {
    kind: CredentialKind,
    credential: OnceCell<Arc<dyn TokenCredential>>,
}

impl AmbientCredentialResolver {
    pub fn from_source(source: &dyn ConfigSource) -> Self {
        Self {
            kind: select_credential_kind(source),
            credential: OnceCell::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::from_source(&EnvConfigSource)
    }
}

impl fmt::Debug for AmbientCredentialResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AmbientCredentialResolver")
            .field("kind", &self.kind)
            .field("initialized", &self.credential.initialized())
            .finish()
    }
}

#[async_trait]
impl CredentialResolver for AmbientCredentialResolver {
    async fn resolve_credential(&self) -> Result<Arc<dyn TokenCredential>, SecretStoreError> {
        self.credential
            .get_or_try_init(|| async { create_credential(&self.kind) })
            .await
            .map(Arc::clone)
            .map_err(|e| SecretStoreError::InvalidCredential(format!("{e:#}")))
    }
}
