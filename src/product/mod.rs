//! API product subsystem.
//!
//! # Data Flow
//! ```text
//! Refresh loop (manager.rs):
//!     fetcher.rs (GET {base}/products)
//!     → On failure: resilience::backoff paces the retry
//!     → On success: catalog.rs publishes a new immutable snapshot
//!
//! Per request:
//!     AuthContext + target service + path
//!     → resolver.rs (exact matching against the current snapshot)
//!     → matching ApiProducts (for quota enforcement downstream)
//! ```
//!
//! # Design Decisions
//! - The catalog is owned by a ProductManager, not a process global
//! - Resolution is synchronous and lock-free
//! - Scope checks and wildcard resource paths are not implemented

pub mod catalog;
pub mod fetcher;
pub mod manager;
pub mod resolver;
pub mod types;

pub use catalog::{CatalogSnapshot, ProductCatalog};
pub use fetcher::{FetchError, HttpProductFetcher, ProductFetcher};
pub use manager::ProductManager;
pub use resolver::resolve;
pub use types::{ApiProduct, ApiProductsResponse, Attribute, SERVICES_ATTRIBUTE};
