//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Catalog refresh loop:
//!     → fetch products from the remote source
//!     → On failure: backoff.rs (next wait before retrying)
//!     → On success: backoff reset, wait for the regular refresh interval
//! ```
//!
//! # Design Decisions
//! - Backoff only supplies pacing; the caller owns the retry policy
//! - Jittered delays keep sidecars from refreshing in lockstep

pub mod backoff;

pub use backoff::ExponentialBackoff;
