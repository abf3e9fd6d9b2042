//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging through `tracing`
//! - Secrets never appear in log fields

pub mod logging;
