//! Configuration and access policy core for an authenticating reverse proxy.

pub mod auth;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;

pub use config::Config;
pub use lifecycle::{bootstrap, Gate};
pub use routing::RouteTable;
pub use security::AccessPolicy;
