//! Access control policy.
//! Decides which authenticated identities may pass the gate.

use crate::config::schema::Config;

/// Allowed-domain restrictions and cookie scope.
///
/// Built once at startup and only read afterwards, so it can be shared across
/// request handlers without locking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessPolicy {
    restrictions: Vec<String>,
    cookie_domain: Option<String>,
}

impl AccessPolicy {
    pub fn new(restrictions: Vec<String>, cookie_domain: Option<String>) -> Self {
        Self {
            restrictions,
            cookie_domain,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.restrictions.clone(),
            config.auth.session.cookie_domain.clone(),
        )
    }

    /// Whether `identifier` (usually an email address) may pass.
    ///
    /// With no restrictions everyone is allowed. Otherwise the identifier must
    /// end with one of the restriction domains, ignoring ASCII case.
    pub fn is_allowed(&self, identifier: &str) -> bool {
        if self.restrictions.is_empty() {
            return true;
        }

        let allowed = self
            .restrictions
            .iter()
            .any(|domain| ends_with_ignore_case(identifier, domain));

        if !allowed {
            tracing::debug!(domain = identity_domain(identifier), "Identity rejected by restrictions");
        }
        allowed
    }

    /// True when at least one restriction is configured.
    pub fn is_restricted(&self) -> bool {
        !self.restrictions.is_empty()
    }

    /// Restriction domains in declaration order.
    pub fn restrictions(&self) -> &[String] {
        &self.restrictions
    }

    /// Domain the session cookie is scoped to, if any.
    pub fn cookie_domain(&self) -> Option<&str> {
        self.cookie_domain.as_deref()
    }
}

/// Domain part of an identity, so rejections can be logged without the address.
fn identity_domain(identifier: &str) -> &str {
    identifier.rsplit_once('@').map_or("", |(_, domain)| domain)
}

fn ends_with_ignore_case(value: &str, suffix: &str) -> bool {
    let (value, suffix) = (value.as_bytes(), suffix.as_bytes());
    value.len() >= suffix.len() && value[value.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}
