//! Product catalog sidecar (v1)
//!
//! Keeps the API product catalog of a mesh adapter in sync with the API
//! management service.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                     PRODUCT CATALOG                          │
//!   │                                                              │
//!   │  ┌─────────┐   ┌──────────────┐   ┌──────────────────────┐   │
//!   │  │ fetcher │──▶│   refresh    │──▶│  catalog snapshot    │   │     Management
//! ◀─┼──│  (HTTP) │   │ loop+backoff │   │     (ArcSwap)        │   │ ◀── API
//!   │  └─────────┘   └──────────────┘   └──────────┬───────────┘   │
//!   │                                              │               │
//!   │                                              ▼               │
//!   │   AuthContext + service + path ──▶ ┌──────────────────┐      │
//!   │                                    │     resolver     │──▶ products
//!   │                                    └──────────────────┘      │
//!   └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `mesh-product-catalog [config.toml]`

use std::path::PathBuf;

use mesh_product_catalog::config::{loader::load_config, AdapterConfig};
use mesh_product_catalog::observability::{logging, metrics};
use mesh_product_catalog::ProductManager;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => load_config(&path)?,
        None => AdapterConfig::default(),
    };

    logging::init(&config.observability.log_level);

    tracing::info!("mesh-product-catalog v0.1.0 starting");
    tracing::info!(
        base_url = %config.catalog.base_url,
        refresh_interval_secs = config.catalog.refresh_interval_secs,
        backoff_initial_ms = config.backoff.initial_ms,
        backoff_max_ms = config.backoff.max_ms,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let manager = ProductManager::start_http(&config)?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    manager.stop().await;

    tracing::info!("Shutdown complete");
    Ok(())
}
