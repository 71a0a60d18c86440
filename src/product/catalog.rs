//! Product catalog snapshots.
//!
//! # Responsibilities
//! - Hold the current set of API products keyed by name
//! - Publish a freshly fetched product list as a new snapshot
//! - Hand out lock-free reads to request-path resolution
//!
//! # Design Decisions
//! - Snapshots are immutable; a refresh swaps in a whole new one
//! - Readers holding an older snapshot keep a consistent view
//! - Duplicate names in a fetch keep the last definition

use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;
use arc_swap::ArcSwap;

use crate::auth::AuthContext;
use crate::observability::metrics;
use crate::product::resolver;
use crate::product::types::ApiProduct;

/// Immutable point-in-time view of the product catalog.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    products: HashMap<String, Arc<ApiProduct>>,
    version: u64,
    fetched_at: Option<SystemTime>,
}

impl CatalogSnapshot {
    /// An empty snapshot, as seen before the first successful fetch.
    pub fn empty() -> Self {
        Self {
            products: HashMap::new(),
            version: 0,
            fetched_at: None,
        }
    }

    /// Build a snapshot from a fetched product list.
    pub fn from_products(products: Vec<ApiProduct>) -> Self {
        let mut map = HashMap::with_capacity(products.len());
        for product in products {
            let name = product.name.clone();
            if map.insert(name.clone(), Arc::new(product)).is_some() {
                tracing::warn!(product = %name, "Duplicate API product name in catalog, keeping last definition");
            }
        }

        Self {
            products: map,
            version: 0,
            fetched_at: Some(SystemTime::now()),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<ApiProduct>> {
        self.products.get(name)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Product names in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.products.keys().map(String::as_str)
    }

    pub fn products(&self) -> impl Iterator<Item = &Arc<ApiProduct>> {
        self.products.values()
    }

    /// Publish counter; 0 until the first publish.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// When the products in this snapshot were fetched.
    pub fn fetched_at(&self) -> Option<SystemTime> {
        self.fetched_at
    }
}

impl Default for CatalogSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// Shared, atomically replaceable product catalog.
#[derive(Debug)]
pub struct ProductCatalog {
    current: ArcSwap<CatalogSnapshot>,
}

impl ProductCatalog {
    /// Create a catalog holding an empty snapshot.
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(CatalogSnapshot::empty()),
        }
    }

    /// Current snapshot. Never blocks.
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.current.load_full()
    }

    /// Replace the catalog contents with a new product list.
    ///
    /// Only the refresh loop calls this; there is a single writer.
    pub fn publish(&self, products: Vec<ApiProduct>) -> Arc<CatalogSnapshot> {
        let mut snapshot = CatalogSnapshot::from_products(products);
        snapshot.version = self.current.load().version + 1;

        let snapshot = Arc::new(snapshot);
        self.current.store(snapshot.clone());

        metrics::record_catalog_published(snapshot.len(), snapshot.version);
        tracing::debug!(
            version = snapshot.version,
            products = snapshot.len(),
            "Published product catalog snapshot"
        );
        snapshot
    }

    /// Resolve the products authorizing a call against the current snapshot.
    pub fn resolve(&self, ctx: &AuthContext, target: &str, path: &str) -> Vec<Arc<ApiProduct>> {
        resolver::resolve(&self.current.load(), ctx, target, path)
    }

    pub fn len(&self) -> usize {
        self.current.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.load().is_empty()
    }

    pub fn version(&self) -> u64 {
        self.current.load().version
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::new()
    }
}
