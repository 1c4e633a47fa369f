//! # Secret Lookup Metrics
//!
//! Counts `/secret` requests by outcome and times the Key Vault round trip.

use crate::observability::metrics::registry::REGISTRY;
use anyhow::Result;
use prometheus::{Histogram, IntCounterVec};
use std::sync::LazyLock;

/// Outcome label for a successful lookup
pub const OUTCOME_SUCCESS: &str = "success";

/// Outcome label when the request was rejected before any network call
pub const OUTCOME_MISSING_CONFIGURATION: &str = "missing_configuration";

static SECRET_LOOKUPS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "keyvault_demo_secret_lookups_total",
            "Total number of secret lookups by outcome",
        ),
        &["outcome"],
    )
    .expect("Failed to create SECRET_LOOKUPS_TOTAL metric - this should never happen")
});

static SECRET_LOOKUP_DURATION: LazyLock<Histogram> = LazyLock::new(|| {
    Histogram::with_opts(
        prometheus::HistogramOpts::new(
            "keyvault_demo_secret_lookup_duration_seconds",
            "Duration of Key Vault secret lookups in seconds",
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
    )
    .expect("Failed to create SECRET_LOOKUP_DURATION metric - this should never happen")
});

/// Register secret metrics with the registry
pub(crate) fn register_secret_metrics() -> Result<()> {
    REGISTRY.register(Box::new(SECRET_LOOKUPS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(SECRET_LOOKUP_DURATION.clone()))?;
    Ok(())
}

pub fn increment_secret_lookups(outcome: &str) {
    SECRET_LOOKUPS_TOTAL.with_label_values(&[outcome]).inc();
}

pub fn observe_secret_lookup_duration(duration: f64) {
    SECRET_LOOKUP_DURATION.observe(duration);
}
