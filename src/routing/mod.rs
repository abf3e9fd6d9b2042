//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (host, path)
//!     → router.rs (ordered route lookup)
//!     → matcher.rs (evaluate host and prefix conditions)
//!     → Return: matched route + forward path, or no match
//!
//! Route Compilation (at startup):
//!     ProxyRoute[] (declaration order)
//!     → Compile matchers
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always matches same route
//! - First match wins, in declaration order

pub mod matcher;
pub mod router;

pub use matcher::RequestTarget;
pub use router::{RouteMatch, RouteTable};
