//! Wiring between the gate configuration and the OAuth2 flow.
//!
//! The flow itself (authorization redirect, token exchange, sessions) lives
//! outside this crate. It receives the provider settings from `Config`, the
//! identity check from `security::AccessPolicy` and its endpoint paths from here.

pub mod paths;

pub use paths::{apply_overrides, AuthPaths};
