//! # Secret Store Providers
//!
//! The secret store is an external authority. Handlers only see the traits in
//! this module; the Azure Key Vault implementation lives in [`azure`].
//!
//! A [`SecretStoreConnector`] turns a vault locator into a [`SecretStore`] for
//! the duration of one request. Nothing here caches secret values.

pub mod azure;

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A secret value fetched from the store
///
/// `Debug` never prints the value and the buffer is wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretValue(String);

impl SecretValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the plaintext
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretValue(<redacted>)")
    }
}

/// Failures returned by a secret store
#[derive(Debug, Error)]
pub enum SecretStoreError {
    #[error("secret not found: {0}")]
    NotFound(String),

    #[error("access to secret denied: {0}")]
    AccessDenied(String),

    #[error("credential rejected: {0}")]
    InvalidCredential(String),

    #[error("secret store unavailable: {0}")]
    Unavailable(String),

    #[error("invalid vault locator {locator}: {reason}")]
    InvalidLocator { locator: String, reason: String },

    #[error("unexpected secret store response: {0}")]
    InvalidResponse(String),
}

impl SecretStoreError {
    /// Short label for metrics and structured logs
    pub fn as_str(&self) -> &'static str {
        match self {
            SecretStoreError::NotFound(_) => "not_found",
            SecretStoreError::AccessDenied(_) => "access_denied",
            SecretStoreError::InvalidCredential(_) => "invalid_credential",
            SecretStoreError::Unavailable(_) => "unavailable",
            SecretStoreError::InvalidLocator { .. } => "invalid_locator",
            SecretStoreError::InvalidResponse(_) => "invalid_response",
        }
    }
}

/// Read-only access to secrets in one vault
#[async_trait]
pub trait SecretStore: Send + Sync + fmt::Debug {
    /// Fetch the current version of `secret_name`
    async fn get_secret(&self, secret_name: &str) -> Result<SecretValue, SecretStoreError>;
}

/// Builds a [`SecretStore`] scoped to a vault locator
#[async_trait]
pub trait SecretStoreConnector: Send + Sync + fmt::Debug {
    async fn connect(&self, vault_uri: &str) -> Result<Box<dyn SecretStore>, SecretStoreError>;
}
