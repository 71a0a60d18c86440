//! Resolution of the API products that authorize a call.
//!
//! # Matching
//! ```text
//! for each product name granted in the AuthContext (grant order):
//!     look the product up in the snapshot (unknown names are skipped)
//!     for each `istio-services` target equal to the called service:
//!         for each resource equal to the request path:
//!             emit the product
//! ```
//!
//! # Design Decisions
//! - Exact string matches only; no wildcards or prefixes
//! - A product is emitted once per qualifying attribute/target/resource
//!   combination, so duplicates are possible
//! - No error path: anything that does not match yields nothing
//! - Scope checks are not applied here

use std::sync::Arc;

use crate::auth::AuthContext;
use crate::observability::metrics;
use crate::product::catalog::CatalogSnapshot;
use crate::product::types::ApiProduct;

/// Products in `snapshot` that authorize `ctx` to call `path` on `target`.
pub fn resolve(
    snapshot: &CatalogSnapshot,
    ctx: &AuthContext,
    target: &str,
    path: &str,
) -> Vec<Arc<ApiProduct>> {
    let mut result = Vec::new();

    for name in &ctx.api_products {
        let Some(product) = snapshot.get(name) else {
            continue;
        };

        for service in product.target_services() {
            if service != target {
                continue;
            }
            for resource in &product.api_resources {
                if resource == path {
                    result.push(product.clone());
                }
            }
        }
    }

    metrics::record_resolve(!result.is_empty());
    tracing::debug!(
        target_service = %target,
        path = %path,
        granted = ctx.api_products.len(),
        matched = result.len(),
        "Resolved API products"
    );
    result
}
