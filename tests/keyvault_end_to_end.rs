//! # Key Vault End-to-End Tests
//!
//! Routers wired to the real [`KeyVaultConnector`] against a wiremock vault.
//! Authentication uses `KEYVAULT_STATIC_TOKEN` so no Azure identity is needed.

mod common;

use axum::http::StatusCode;
use common::get;
use keyvault_demo::config::StaticConfigSource;
use keyvault_demo::constants::{KEYVAULT_STATIC_TOKEN_KEY, KEYVAULT_URI_KEY, SECRET_NAME_KEY};
use keyvault_demo::handlers::{AppState, SECRET_RETRIEVAL_FAILED_MESSAGE};
use keyvault_demo::provider::azure::{AmbientCredentialResolver, KeyVaultConnector};
use keyvault_demo::server::{function_router, web_router};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

fn state_with(server: &MockServer, secret_name: &str, http: reqwest::Client) -> AppState {
    let config = StaticConfigSource::new()
        .with(KEYVAULT_URI_KEY, server.uri())
        .with(SECRET_NAME_KEY, secret_name)
        .with(KEYVAULT_STATIC_TOKEN_KEY, TOKEN);
    let resolver = AmbientCredentialResolver::from_source(&config);
    let connector = KeyVaultConnector::new(http, Arc::new(resolver));
    AppState::new(Arc::new(config), Arc::new(connector))
}

fn state_for(server: &MockServer, secret_name: &str) -> AppState {
    state_with(server, secret_name, reqwest::Client::new())
}

fn secret_path(name: &str) -> wiremock::matchers::PathRegexMatcher {
    path_regex(format!("^/secrets/{name}/?$"))
}

async fn mount_secret(server: &MockServer, name: &str, value: &str) {
    Mock::given(method("GET"))
        .and(secret_path(name))
        .and(query_param("api-version", "7.4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": value,
            "id": format!("{}/secrets/{name}/0123456789abcdef", server.uri()),
            "attributes": { "enabled": true }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_web_api_masks_vault_secret() {
    let server = MockServer::start().await;
    mount_secret(&server, "db-password", "abcdef123").await;

    let response = get(&web_router(state_for(&server, "db-password")), "/secret").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, r#"{"loaded":true,"masked":"abcd****"}"#);
}

#[tokio::test]
async fn test_function_host_returns_vault_secret() {
    let server = MockServer::start().await;
    mount_secret(&server, "db-password", "abcdef123").await;

    let response = get(&function_router(state_for(&server, "db-password")), "/secret").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        r#"{"secretName":"db-password","value":"abcdef123"}"#
    );
}

#[tokio::test]
async fn test_missing_secret_is_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(secret_path("nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "code": "SecretNotFound",
                "message": "A secret with (name/id) nope was not found"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = get(&web_router(state_for(&server, "nope")), "/secret").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!response.body.contains("nope"));
}

#[tokio::test]
async fn test_rejected_token_is_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(secret_path("db-password"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "code": "Unauthorized", "message": "AKV10000: Request is missing a Bearer" }
        })))
        .mount(&server)
        .await;

    for app in [
        web_router(state_for(&server, "db-password")),
        function_router(state_for(&server, "db-password")),
    ] {
        let response = get(&app, "/secret").await;
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body, SECRET_RETRIEVAL_FAILED_MESSAGE);
        assert!(!response.body.contains(TOKEN));
    }
}

#[tokio::test]
async fn test_slow_vault_is_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(secret_path("db-password"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "value": "abcdef123" }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;
    let http = reqwest::Client::builder()
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();

    let response = get(&web_router(state_with(&server, "db-password", http)), "/secret").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, SECRET_RETRIEVAL_FAILED_MESSAGE);
}

#[tokio::test]
async fn test_each_request_hits_the_vault() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(secret_path("db-password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": "abcdef123" })))
        .expect(3)
        .mount(&server)
        .await;
    let app = web_router(state_for(&server, "db-password"));

    for _ in 0..3 {
        assert_eq!(get(&app, "/secret").await.status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_health_makes_no_vault_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let response = get(&web_router(state_for(&server, "db-password")), "/health").await;

    assert_eq!(response.status, StatusCode::OK);
}
