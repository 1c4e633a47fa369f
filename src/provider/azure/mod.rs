//! # Azure Providers
//!
//! Azure Key Vault secret store.

pub mod key_vault;

pub use key_vault::{
    AmbientCredentialResolver, CredentialResolver, KeyVaultClient, KeyVaultConnector,
};
