//! API product resolution for a service-mesh API management adapter.

pub mod auth;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod product;
pub mod resilience;

pub use auth::AuthContext;
pub use config::AdapterConfig;
pub use lifecycle::Shutdown;
pub use product::{ApiProduct, ProductCatalog, ProductManager};
pub use resilience::ExponentialBackoff;
