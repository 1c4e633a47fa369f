//! # Request Handlers
//!
//! `/health`, `/secret` and `/metrics` handlers for both hosts.
//!
//! The web API and the function host differ only in payload shape and in the
//! text of the misconfiguration response; everything else is shared.

mod error;
mod health;
mod metrics;
mod secret;

pub use error::{
    ApiError, FUNCTION_MISSING_CONFIGURATION_MESSAGE, SECRET_RETRIEVAL_FAILED_MESSAGE,
    WEB_MISSING_CONFIGURATION_MESSAGE,
};
pub use health::{function_health, web_health, HealthPayload};
pub use metrics::metrics;
pub use secret::{function_secret, web_secret, FullSecretPayload, MaskedSecretPayload};

use crate::config::{ConfigSource, EnvConfigSource};
use crate::provider::SecretStoreConnector;
use std::sync::Arc;

/// Shared handler state
///
/// Holds no secret data. Configuration is re-read on every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<dyn ConfigSource>,
    pub stores: Arc<dyn SecretStoreConnector>,
}

impl AppState {
    pub fn new(config: Arc<dyn ConfigSource>, stores: Arc<dyn SecretStoreConnector>) -> Self {
        Self { config, stores }
    }

    /// State reading settings from the process environment
    pub fn from_env(stores: Arc<dyn SecretStoreConnector>) -> Self {
        Self::new(Arc::new(EnvConfigSource), stores)
    }
}
