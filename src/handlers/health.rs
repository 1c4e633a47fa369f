//! # Health Handlers
//!
//! Liveness checks. No dependencies, never fail.

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct HealthPayload {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// `GET /health` on the web API: status plus the current UTC instant
pub async fn web_health() -> Json<HealthPayload> {
    Json(HealthPayload {
        status: "ok",
        timestamp: Some(Utc::now()),
    })
}

/// `GET /health` on the function host
pub async fn function_health() -> Json<HealthPayload> {
    Json(HealthPayload {
        status: "ok",
        timestamp: None,
    })
}
