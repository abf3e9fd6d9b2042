//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Authenticated identity (from the auth flow):
//!     → access_control.rs (check against restriction domains)
//!     → allow, or reject before proxying
//! ```
//!
//! # Design Decisions
//! - No restrictions configured = open to every authenticated identity
//! - Policy is immutable; checks are pure functions

pub mod access_control;

pub use access_control::AccessPolicy;
