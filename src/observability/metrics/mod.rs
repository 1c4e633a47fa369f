//! # Metrics Module
//!
//! Prometheus metrics, organized by responsibility.
//!
//! ## Sub-modules
//!
//! - `registry` - Metrics registry setup, registration and exposition
//! - `secret_metrics` - `/secret` lookup outcomes and Key Vault latency

pub mod registry;
pub mod secret_metrics;

pub use registry::*;
pub use secret_metrics::*;
