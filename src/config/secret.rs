//! # Secret Settings
//!
//! The two values the `/secret` handlers need: where the vault is and which
//! secret to read.

use super::source::ConfigSource;
use crate::constants::{KEYVAULT_URI_KEY, SECRET_NAME_KEY};
use thiserror::Error;

/// Settings resolved for a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretSettings {
    /// Key Vault URI or bare vault name
    pub vault_uri: String,
    /// Name of the secret to fetch
    pub secret_name: String,
}

/// One or more required settings were absent, empty or whitespace-only
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required settings: {}", .missing.join(", "))]
pub struct MissingSettings {
    pub missing: Vec<&'static str>,
}

impl SecretSettings {
    /// Read both settings from `source`
    ///
    /// Values are trimmed. A blank value is treated the same as an unset one.
    pub fn from_source(source: &dyn ConfigSource) -> Result<Self, MissingSettings> {
        let vault_uri = non_blank(source, KEYVAULT_URI_KEY);
        let secret_name = non_blank(source, SECRET_NAME_KEY);

        match (vault_uri, secret_name) {
            (Some(vault_uri), Some(secret_name)) => Ok(Self {
                vault_uri,
                secret_name,
            }),
            (vault_uri, secret_name) => {
                let mut missing = Vec::with_capacity(2);
                if vault_uri.is_none() {
                    missing.push(KEYVAULT_URI_KEY);
                }
                if secret_name.is_none() {
                    missing.push(SECRET_NAME_KEY);
                }
                Err(MissingSettings { missing })
            }
        }
    }
}

fn non_blank(source: &dyn ConfigSource, key: &str) -> Option<String> {
    source
        .get(key)
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
