//! # Azure Key Vault Client
//!
//! Reads the latest version of a secret with the Key Vault `SecretClient` and
//! maps SDK failures onto [`SecretStoreError`].

use crate::constants::{KEYVAULT_DNS_SUFFIX, KEYVAULT_NAME_MAX_LEN};
use crate::provider::{SecretStore, SecretStoreError, SecretValue};
use async_trait::async_trait;
use azure_core::credentials::TokenCredential;
use azure_core::error::ErrorKind;
use azure_core::http::StatusCode;
use azure_security_keyvault_secrets::models::Secret;
use azure_security_keyvault_secrets::{SecretClient, SecretClientOptions};
use reqwest::Url;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, field, warn, Instrument};

/// `true` for a bare Key Vault name: 1-24 ASCII alphanumerics or `-`
fn is_vault_name(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= KEYVAULT_NAME_MAX_LEN
        && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Construct vault URL from a vault URI, host or bare vault name
///
/// `my-vault` expands to `https://my-vault.vault.azure.net/`. A host such as
/// `my-vault.vault.azure.net` gets an `https://` scheme. Plain `http` is
/// accepted only for `localhost` and `127.0.0.1` (emulators, mock servers).
/// The returned URL always ends with `/` and carries no query.
pub fn construct_vault_url(vault_uri: &str) -> Result<Url, SecretStoreError> {
    let invalid = |reason: String| SecretStoreError::InvalidLocator {
        locator: vault_uri.to_owned(),
        reason,
    };

    let raw = if vault_uri.contains("://") {
        vault_uri.to_owned()
    } else if is_vault_name(vault_uri) {
        format!("https://{vault_uri}.{KEYVAULT_DNS_SUFFIX}/")
    } else {
        format!("https://{vault_uri}")
    };
    let mut url = Url::parse(&raw).map_err(|e| invalid(e.to_string()))?;

    match url.scheme() {
        "https" => {}
        "http" if matches!(url.host_str(), Some("localhost" | "127.0.0.1")) => {}
        "http" => {
            return Err(invalid(
                "plain http is only allowed for localhost".to_owned(),
            ))
        }
        other => return Err(invalid(format!("unsupported scheme {other}"))),
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}

/// Map a failed `get_secret` call to a store error
fn classify_failure(error: &azure_core::Error, secret_name: &str) -> SecretStoreError {
    if matches!(error.kind(), ErrorKind::Credential) {
        return SecretStoreError::InvalidCredential(error.to_string());
    }

    match error.http_status() {
        Some(StatusCode::Unauthorized) => SecretStoreError::InvalidCredential(error.to_string()),
        Some(StatusCode::Forbidden) => SecretStoreError::AccessDenied(error.to_string()),
        Some(StatusCode::NotFound) => SecretStoreError::NotFound(secret_name.to_owned()),
        _ => SecretStoreError::Unavailable(error.to_string()),
    }
}

/// Azure Key Vault secret reader scoped to one vault
pub struct KeyVaultClient {
    client: SecretClient,
    vault_url: Url,
}

impl fmt::Debug for KeyVaultClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyVaultClient")
            .field("vault_url", &self.vault_url.as_str())
            .finish_non_exhaustive()
    }
}

impl KeyVaultClient {
    pub fn new(
        vault_url: Url,
        credential: Arc<dyn TokenCredential>,
        options: SecretClientOptions,
    ) -> Result<Self, SecretStoreError> {
        let client = SecretClient::new(vault_url.as_str(), credential, Some(options)).map_err(
            |e| SecretStoreError::InvalidLocator {
                locator: vault_url.to_string(),
                reason: format!("Failed to create Azure Key Vault SecretClient: {e}"),
            },
        )?;

        Ok(Self { client, vault_url })
    }

    async fn fetch(&self, secret_name: &str) -> Result<SecretValue, SecretStoreError> {
        // Latest version; no version option
        let response = self
            .client
            .get_secret(secret_name, None)
            .await
            .map_err(|e| classify_failure(&e, secret_name))?;

        let secret = serde_json::from_slice::<Secret>(&response.into_body()).map_err(|e| {
            SecretStoreError::InvalidResponse(format!(
                "Failed to deserialize Azure secret response: {e}"
            ))
        })?;

        secret.value.map(SecretValue::new).ok_or_else(|| {
            SecretStoreError::InvalidResponse("secret bundle has no value".to_owned())
        })
    }
}

#[async_trait]
impl SecretStore for KeyVaultClient {
    async fn get_secret(&self, secret_name: &str) -> Result<SecretValue, SecretStoreError> {
        let span = tracing::debug_span!(
            "keyvault.secret.get",
            secret.name = secret_name,
            vault.host = self.vault_url.host_str().unwrap_or("unknown"),
            operation.success = field::Empty,
            operation.duration_ms = field::Empty,
            error.kind = field::Empty,
        );
        let span_clone = span.clone();
        let start = Instant::now();

        async move {
            let result = self.fetch(secret_name).await;
            span_clone.record("operation.duration_ms", start.elapsed().as_millis() as u64);
            match &result {
                Ok(_) => {
                    span_clone.record("operation.success", true);
                    debug!("Fetched Key Vault secret {}", secret_name);
                }
                Err(e) => {
                    span_clone.record("operation.success", false);
                    span_clone.record("error.kind", e.as_str());
                    warn!("Failed to fetch Key Vault secret {}: {}", secret_name, e);
                }
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vault_name_expands_to_url() {
        let url = construct_vault_url("my-vault").unwrap();
        assert_eq!(url.as_str(), "https://my-vault.vault.azure.net/");
    }

    #[test]
    fn test_full_url_gets_trailing_slash() {
        let url = construct_vault_url("https://custom-vault.vault.azure.net").unwrap();
        assert_eq!(url.as_str(), "https://custom-vault.vault.azure.net/");
    }

    #[test]
    fn test_bare_host_gets_https_scheme() {
        for host in ["my-vault.vault.azure.net", "my-vault.vault.azure.net/"] {
            let url = construct_vault_url(host).unwrap();
            assert_eq!(url.as_str(), "https://my-vault.vault.azure.net/", "{host}");
        }
    }

    #[test]
    fn test_overlong_name_is_not_expanded() {
        let name = "a".repeat(KEYVAULT_NAME_MAX_LEN + 1);
        let url = construct_vault_url(&name).unwrap();
        assert_eq!(url.host_str(), Some(name.as_str()));
    }

    #[test]
    fn test_localhost_http_allowed() {
        assert!(construct_vault_url("http://127.0.0.1:8443").is_ok());
        assert!(construct_vault_url("http://localhost:8443/").is_ok());
    }

    #[test]
    fn test_remote_http_rejected() {
        let err = construct_vault_url("http://my-vault.vault.azure.net/").unwrap_err();
        assert!(matches!(err, SecretStoreError::InvalidLocator { .. }));
    }

    #[test]
    fn test_unsupported_scheme_rejected() {
        let err = construct_vault_url("ftp://my-vault").unwrap_err();
        assert!(matches!(err, SecretStoreError::InvalidLocator { .. }));
    }

    #[test]
    fn test_bare_name_with_spaces_rejected() {
        let err = construct_vault_url("my vault").unwrap_err();
        assert!(matches!(err, SecretStoreError::InvalidLocator { .. }));
    }

    #[test]
    fn test_credential_error_is_invalid_credential() {
        let error = azure_core::Error::message(ErrorKind::Credential, "token expired");
        assert!(matches!(
            classify_failure(&error, "s"),
            SecretStoreError::InvalidCredential(_)
        ));
    }

    #[test]
    fn test_transport_error_is_unavailable() {
        let error = azure_core::Error::message(ErrorKind::Io, "connection reset");
        assert!(matches!(
            classify_failure(&error, "s"),
            SecretStoreError::Unavailable(_)
        ));
    }
}
