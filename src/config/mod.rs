//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (YAML/TOML)
//!     → loader.rs (read & parse into a RawDocument tree)
//!     → document.rs (decode into the all-optional document shape)
//!     → validation.rs (presence checks, defaults, route sanity)
//!     → Config (validated, immutable)
//!     → shared via Arc to routing, access control and the auth flow
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - Only required fields fail; everything else defaults to empty
//! - Validation separates syntactic (serde) from semantic checks

mod document;
pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load, load_config, ConfigError, DocumentFormat, ParseError, RawDocument};
pub use schema::{
    AuthSettings, Config, PathSettings, ProviderInfo, ProxyRoute, Secret, SessionSettings,
    SslSettings,
};
pub use validation::{validate, ValidationError};
