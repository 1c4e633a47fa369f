//! # Azure Key Vault
//!
//! Reads secrets from Azure Key Vault.
//!
//! - `auth` resolves a `TokenCredential` (static token, service principal,
//!   Workload Identity, Managed Identity or Azure CLI)
//! - `client` reads secrets through the SDK `SecretClient` and classifies failures
//! - `connector` ties the two together per vault locator

mod auth;
mod client;
mod connector;

pub use auth::{
    select_credential_kind, AmbientCredentialResolver, CredentialKind, CredentialResolver,
    FallbackCredential, StaticTokenCredential,
};
pub use client::{construct_vault_url, KeyVaultClient};
pub use connector::KeyVaultConnector;
