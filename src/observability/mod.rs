//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Catalog refresh and resolution produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters and gauges)
//!
//! Consumers:
//!     → stdout log aggregation
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured fields rather than formatted messages
//! - Metric updates are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
