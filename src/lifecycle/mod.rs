//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Build route table, access policy, auth paths
//!     → Hand read-only Gate to the serving loop
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then derived policy
//! - Fail fast: any startup error is fatal, nothing is retried

pub mod startup;

pub use startup::{bootstrap, Gate};
