//! Configuration schema definitions.
//!
//! These are the validated, immutable types handed to the rest of the gate.
//! They are only produced by [`validate`](crate::config::validation::validate),
//! so a required field can never be observed empty. The raw, all-optional
//! document shape lives in `document.rs`.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};
use url::Url;

/// Root configuration for the gate.
///
/// This and every settings struct below are `#[non_exhaustive]`: outside this
/// crate they can only be obtained through validation.
///
/// ```compile_fail
/// let ssl = gate::config::SslSettings { cert: None, key: None };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct Config {
    /// Listen address (e.g. ":9999" or "127.0.0.1:8080").
    #[serde(rename = "address")]
    pub addr: String,

    /// TLS material for the listener.
    pub ssl: SslSettings,

    /// Session and OAuth2 provider settings.
    pub auth: AuthSettings,

    /// Proxy routes in declaration order.
    #[serde(rename = "proxy")]
    pub proxies: Vec<ProxyRoute>,

    /// Allowed identity domains. Empty means unrestricted.
    pub restrictions: Vec<String>,

    /// Overrides for the auth flow endpoint paths.
    pub paths: PathSettings,

    /// Directory served when no proxy route matches.
    pub htdocs: PathBuf,
}

/// TLS certificate and key paths.
///
/// Having one without the other is not rejected here; the TLS layer decides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct SslSettings {
    pub cert: Option<PathBuf>,
    pub key: Option<PathBuf>,
}

impl SslSettings {
    /// Certificate and key, only when both are configured.
    pub fn tls_files(&self) -> Option<(&Path, &Path)> {
        match (&self.cert, &self.key) {
            (Some(cert), Some(key)) => Some((cert.as_path(), key.as_path())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct AuthSettings {
    pub session: SessionSettings,
    pub info: ProviderInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct SessionSettings {
    /// Session signing secret.
    pub key: Secret,

    /// Domain the session cookie is scoped to.
    pub cookie_domain: Option<String>,
}

/// OAuth2 provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct ProviderInfo {
    /// Provider identifier, e.g. "google" or "github".
    pub service: String,
    pub client_id: String,
    pub client_secret: Secret,
    pub redirect_url: String,
    pub endpoint: Option<String>,
    pub api_endpoint: Option<String>,
}

/// A single proxy route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct ProxyRoute {
    /// Literal path prefix to match.
    pub path: String,

    /// Upstream base URL exactly as written in the document.
    pub dest: String,

    /// `dest` parsed. The `url` crate normalizes it (lowercase host, `/` path
    /// for a bare origin), so this is only used to build upstream requests.
    #[serde(skip)]
    pub dest_url: Url,

    /// Remove `path` from the request path before forwarding.
    pub strip_path: bool,

    /// Host header to match exactly. `None` matches any host.
    pub host: Option<String>,
}

impl ProxyRoute {
    /// Build the upstream URL for a forwarded path.
    ///
    /// The dest base path and `forward_path` are joined with exactly one slash.
    /// Query strings from dest and request are concatenated with `&`.
    pub fn upstream_url(&self, forward_path: &str, query: Option<&str>) -> Url {
        let mut url = self.dest_url.clone();

        let base = self.dest_url.path();
        let joined = match (base.ends_with('/'), forward_path.starts_with('/')) {
            (true, true) => format!("{}{}", base, &forward_path[1..]),
            (false, false) => format!("{}/{}", base, forward_path),
            _ => format!("{}{}", base, forward_path),
        };
        url.set_path(&joined);

        let query = match (self.dest_url.query().filter(|q| !q.is_empty()), query.filter(|q| !q.is_empty())) {
            (Some(base_q), Some(req_q)) => Some(format!("{}&{}", base_q, req_q)),
            (Some(q), None) | (None, Some(q)) => Some(q.to_string()),
            (None, None) => None,
        };
        url.set_query(query.as_deref());

        url
    }
}

/// Auth flow endpoint path overrides. `None` keeps the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct PathSettings {
    pub login: Option<String>,
    pub logout: Option<String>,
    pub callback: Option<String>,
    pub error: Option<String>,
}

/// A secret value that never shows up in logs or serialized output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The underlying value.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("***")
    }
}
