//! # Secret Handlers
//!
//! `GET /secret` for both hosts. Each request reads `KEYVAULT_URI` and
//! `SECRET_NAME`, connects to the vault and performs exactly one fetch.
//! Missing settings short-circuit before any network call.

use super::error::{
    ApiError, FUNCTION_MISSING_CONFIGURATION_MESSAGE, WEB_MISSING_CONFIGURATION_MESSAGE,
};
use super::AppState;
use crate::config::SecretSettings;
use crate::masking::mask_secret;
use crate::observability::metrics::{
    increment_secret_lookups, observe_secret_lookup_duration, OUTCOME_MISSING_CONFIGURATION,
    OUTCOME_SUCCESS,
};
use crate::provider::SecretValue;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::fmt;
use std::time::Instant;
use tracing::{error, info, warn};

/// Web API response: only a masked prefix leaves the process
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaskedSecretPayload {
    pub loaded: bool,
    pub masked: String,
}

/// Function host response: the raw value
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullSecretPayload {
    pub secret_name: String,
    pub value: String,
}

impl fmt::Debug for FullSecretPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FullSecretPayload")
            .field("secret_name", &self.secret_name)
            .field("value", &"<redacted>")
            .finish()
    }
}

/// Resolve settings and fetch the secret once
async fn load_secret(
    state: &AppState,
    missing_message: &'static str,
) -> Result<(SecretSettings, SecretValue), ApiError> {
    let settings = match SecretSettings::from_source(state.config.as_ref()) {
        Ok(settings) => settings,
        Err(source) => {
            warn!("Rejecting secret request: {}", source);
            increment_secret_lookups(OUTCOME_MISSING_CONFIGURATION);
            return Err(ApiError::MissingConfiguration {
                source,
                message: missing_message,
            });
        }
    };

    let start = Instant::now();
    let result = async {
        let store = state.stores.connect(&settings.vault_uri).await?;
        store.get_secret(&settings.secret_name).await
    }
    .await;
    observe_secret_lookup_duration(start.elapsed().as_secs_f64());

    match result {
        Ok(value) => {
            increment_secret_lookups(OUTCOME_SUCCESS);
            info!(secret.name = %settings.secret_name, "Secret loaded");
            Ok((settings, value))
        }
        Err(e) => {
            increment_secret_lookups(e.as_str());
            error!(
                secret.name = %settings.secret_name,
                error.kind = e.as_str(),
                "Secret lookup failed: {}",
                e
            );
            Err(e.into())
        }
    }
}

/// `GET /secret` on the web API
pub async fn web_secret(
    State(state): State<AppState>,
) -> Result<Json<MaskedSecretPayload>, ApiError> {
    let (_, value) = load_secret(&state, WEB_MISSING_CONFIGURATION_MESSAGE).await?;

    Ok(Json(MaskedSecretPayload {
        loaded: true,
        masked: mask_secret(value.expose()),
    }))
}

/// `GET /secret` on the function host
pub async fn function_secret(
    State(state): State<AppState>,
) -> Result<Json<FullSecretPayload>, ApiError> {
    let (settings, value) = load_secret(&state, FUNCTION_MISSING_CONFIGURATION_MESSAGE).await?;

    Ok(Json(FullSecretPayload {
        secret_name: settings.secret_name,
        value: value.expose().to_owned(),
    }))
}
