//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AdapterConfig (validated, immutable)
//!     → handed to the product manager and observability setup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Backoff settings are not validated; the generator normalizes them

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::AdapterConfig;
pub use schema::BackoffConfig;
pub use schema::CatalogConfig;
pub use schema::ObservabilityConfig;
