//! Endpoint paths used by the OAuth2 flow.

use serde::Serialize;

use crate::config::schema::PathSettings;

pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_LOGOUT_PATH: &str = "/logout";
pub const DEFAULT_CALLBACK_PATH: &str = "/oauth2callback";
pub const DEFAULT_ERROR_PATH: &str = "/oauth2error";

/// Path table for the auth flow component.
///
/// Built at startup and handed to the auth flow by reference instead of living in
/// process-wide mutable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthPaths {
    pub login: String,
    pub logout: String,
    pub callback: String,
    pub error: String,
}

impl Default for AuthPaths {
    fn default() -> Self {
        Self {
            login: DEFAULT_LOGIN_PATH.to_string(),
            logout: DEFAULT_LOGOUT_PATH.to_string(),
            callback: DEFAULT_CALLBACK_PATH.to_string(),
            error: DEFAULT_ERROR_PATH.to_string(),
        }
    }
}

impl AuthPaths {
    /// Defaults with the configured overrides applied.
    pub fn from_settings(settings: &PathSettings) -> Self {
        let mut paths = Self::default();
        apply_overrides(settings, &mut paths);
        paths
    }

    /// Whether `path` is one of the auth flow's own endpoints.
    pub fn is_auth_path(&self, path: &str) -> bool {
        [&self.login, &self.logout, &self.callback, &self.error]
            .iter()
            .any(|p| p.as_str() == path)
    }
}

/// Overwrite each entry of `paths` whose override is set. Unset overrides leave
/// the existing value alone.
pub fn apply_overrides(settings: &PathSettings, paths: &mut AuthPaths) {
    let overrides = [
        (&settings.login, &mut paths.login),
        (&settings.logout, &mut paths.logout),
        (&settings.callback, &mut paths.callback),
        (&settings.error, &mut paths.error),
    ];

    for (setting, slot) in overrides {
        if let Some(path) = setting.as_deref().filter(|p| !p.is_empty()) {
            *slot = path.to_string();
        }
    }
}
