//! # Routers
//!
//! One router per host. Both expose `/health`, `/secret` and `/metrics`.

use crate::handlers::{function_health, function_secret, web_health, web_secret};
use crate::handlers::{metrics, AppState};
use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Router for the web API (masked secret, timestamped health)
pub fn web_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(web_health))
        .route("/secret", get(web_secret))
        .route("/metrics", get(metrics))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Router for the Azure Functions custom handler (full secret value)
///
/// `deploy/function/host.json` sets an empty route prefix and forwards
/// requests unchanged, so the paths match the web API.
pub fn function_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(function_health))
        .route("/secret", get(function_secret))
        .route("/metrics", get(metrics))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
