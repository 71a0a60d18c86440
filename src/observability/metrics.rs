//! Metrics collection and exposition.
//!
//! # Metrics
//! - `catalog_refresh_total` (counter): refresh attempts by outcome
//! - `catalog_products` (gauge): products in the current snapshot
//! - `catalog_version` (gauge): publish counter of the current snapshot
//! - `catalog_resolve_total` (counter): resolutions by whether anything matched

use std::net::SocketAddr;
use metrics::{counter, gauge};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter listening on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a refresh attempt ("success" or "failure").
pub fn record_refresh(outcome: &'static str) {
    counter!("catalog_refresh_total", "outcome" => outcome).increment(1);
}

/// Record a newly published snapshot.
pub fn record_catalog_published(products: usize, version: u64) {
    gauge!("catalog_products").set(products as f64);
    gauge!("catalog_version").set(version as f64);
}

pub fn record_resolve(matched: bool) {
    let matched = if matched { "true" } else { "false" };
    counter!("catalog_resolve_total", "matched" => matched).increment(1);
}
