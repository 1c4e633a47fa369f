//! # Shared Test Helpers
//!
//! Fake secret store that records calls, mutable configuration, and a small
//! request helper for driving routers with `oneshot`.

#![allow(dead_code, reason = "Each test binary uses a different subset of helpers")]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use keyvault_demo::config::ConfigSource;
use keyvault_demo::constants::{KEYVAULT_URI_KEY, SECRET_NAME_KEY};
use keyvault_demo::provider::{SecretStore, SecretStoreConnector, SecretStoreError, SecretValue};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use tower::ServiceExt;

/// What the fake store answers
#[derive(Debug, Clone)]
pub enum FakeOutcome {
    Value(String),
    NotFound,
    AccessDenied,
}

/// Connector returning a [`FakeStore`] and counting every call
#[derive(Debug, Clone)]
pub struct FakeConnector {
    outcome: Arc<RwLock<FakeOutcome>>,
    connects: Arc<AtomicUsize>,
    fetches: Arc<AtomicUsize>,
    vaults: Arc<RwLock<Vec<String>>>,
}

impl FakeConnector {
    pub fn new(outcome: FakeOutcome) -> Self {
        Self {
            outcome: Arc::new(RwLock::new(outcome)),
            connects: Arc::new(AtomicUsize::new(0)),
            fetches: Arc::new(AtomicUsize::new(0)),
            vaults: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn returning(value: &str) -> Self {
        Self::new(FakeOutcome::Value(value.to_owned()))
    }

    /// Change what later fetches return (simulates rotation)
    pub fn set_outcome(&self, outcome: FakeOutcome) {
        *self.outcome.write().unwrap() = outcome;
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn vaults(&self) -> Vec<String> {
        self.vaults.read().unwrap().clone()
    }
}

#[async_trait]
impl SecretStoreConnector for FakeConnector {
    async fn connect(&self, vault_uri: &str) -> Result<Box<dyn SecretStore>, SecretStoreError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        self.vaults.write().unwrap().push(vault_uri.to_owned());
        Ok(Box::new(FakeStore {
            outcome: self.outcome.read().unwrap().clone(),
            fetches: Arc::clone(&self.fetches),
        }))
    }
}

#[derive(Debug)]
pub struct FakeStore {
    outcome: FakeOutcome,
    fetches: Arc<AtomicUsize>,
}

#[async_trait]
impl SecretStore for FakeStore {
    async fn get_secret(&self, secret_name: &str) -> Result<SecretValue, SecretStoreError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            FakeOutcome::Value(value) => Ok(SecretValue::new(value.clone())),
            FakeOutcome::NotFound => Err(SecretStoreError::NotFound(secret_name.to_owned())),
            FakeOutcome::AccessDenied => {
                Err(SecretStoreError::AccessDenied("Forbidden".to_owned()))
            }
        }
    }
}

/// Configuration that tests can change between requests
#[derive(Debug, Default, Clone)]
pub struct MutableConfig {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MutableConfig {
    pub fn set(&self, key: &str, value: &str) {
        self.values
            .write()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
    }
}

impl ConfigSource for MutableConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().unwrap().get(key).cloned()
    }
}

/// Configuration with both settings present
pub fn valid_config(vault: &str, secret: &str) -> MutableConfig {
    let config = MutableConfig::default();
    config.set(KEYVAULT_URI_KEY, vault);
    config.set(SECRET_NAME_KEY, secret);
    config
}

/// Response captured from a router
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Send `GET uri` through `app`
pub async fn get(app: &Router, uri: &str) -> TestResponse {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(axum::http::header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_owned());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    TestResponse {
        status,
        content_type,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}
