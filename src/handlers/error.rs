//! # API Errors
//!
//! Maps handler failures to HTTP responses. Every failure is a `500` with a
//! plain-text body; no body ever carries secret material.

use crate::config::MissingSettings;
use crate::provider::SecretStoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Web API body when `KEYVAULT_URI` or `SECRET_NAME` is missing
pub const WEB_MISSING_CONFIGURATION_MESSAGE: &str = "Key Vault configuration missing.";

/// Function host body when `KEYVAULT_URI` or `SECRET_NAME` is missing
pub const FUNCTION_MISSING_CONFIGURATION_MESSAGE: &str =
    "Missing KEYVAULT_URI or SECRET_NAME app settings.";

/// Body when the store call fails
pub const SECRET_RETRIEVAL_FAILED_MESSAGE: &str = "Failed to retrieve secret from Key Vault.";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Required settings absent; no outbound call was made
    #[error("{source}")]
    MissingConfiguration {
        source: MissingSettings,
        message: &'static str,
    },

    #[error(transparent)]
    SecretStore(#[from] SecretStoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingConfiguration { .. } | ApiError::SecretStore(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            ApiError::MissingConfiguration { message, .. } => *message,
            ApiError::SecretStore(_) => SECRET_RETRIEVAL_FAILED_MESSAGE,
        };
        (self.status(), body).into_response()
    }
}
