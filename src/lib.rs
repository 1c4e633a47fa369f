//! Key Vault Demo Library
//!
//! Two small HTTP hosts share this library:
//!
//! - the **web API** (`keyvault-demo-api`) returns a masked secret prefix
//! - the **function host** (`keyvault-demo-function`) is an Azure Functions
//!   custom handler returning the full secret value
//!
//! Both expose `/health` and `/secret`. Secret lookups go through the
//! [`provider::SecretStoreConnector`] trait so tests can swap in a fake store.

pub mod config;
pub mod constants;
pub mod handlers;
pub mod masking;
pub mod observability;
pub mod provider;
pub mod runtime;
pub mod server;
