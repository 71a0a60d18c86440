//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Init logging/metrics → Start product manager
//!
//! Shutdown (shutdown.rs):
//!     Ctrl-C received → Trigger shutdown → Refresh loop exits → Process exits
//! ```
//!
//! # Design Decisions
//! - Long-running tasks subscribe to a single broadcast signal
//! - Stop waits for the refresh task so no publish races process exit

pub mod shutdown;

pub use shutdown::Shutdown;
