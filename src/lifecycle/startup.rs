//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Build the route table, access policy and auth paths in dependency order
//! - Log a summary of what the gate will serve
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Everything is built synchronously, before traffic is accepted
//! - Results are immutable and shared via Arc

use std::path::Path;
use std::sync::Arc;

use crate::auth::AuthPaths;
use crate::config::{load_config, Config, ConfigError};
use crate::routing::RouteTable;
use crate::security::AccessPolicy;

/// Read-only policy handed to the serving loop.
#[derive(Debug, Clone)]
pub struct Gate {
    pub config: Arc<Config>,
    pub routes: Arc<RouteTable>,
    pub access: Arc<AccessPolicy>,
    pub auth_paths: Arc<AuthPaths>,
}

impl Gate {
    /// Derive routing, access and auth path state from a validated config.
    pub fn from_config(config: Config) -> Self {
        let routes = RouteTable::from_config(&config.proxies);
        let access = AccessPolicy::from_config(&config);
        let auth_paths = AuthPaths::from_settings(&config.paths);

        Self {
            config: Arc::new(config),
            routes: Arc::new(routes),
            access: Arc::new(access),
            auth_paths: Arc::new(auth_paths),
        }
    }
}

/// Load the configuration at `path` and build the gate.
pub fn bootstrap(path: &Path) -> Result<Gate, ConfigError> {
    let config = load_config(path)?;
    let gate = Gate::from_config(config);

    let config = &gate.config;
    tracing::info!(
        path = %path.display(),
        address = %config.addr,
        service = %config.auth.info.service,
        routes = gate.routes.len(),
        restrictions = config.restrictions.len(),
        tls = config.ssl.tls_files().is_some(),
        htdocs = %config.htdocs.display(),
        "Configuration loaded"
    );

    Ok(gate)
}
