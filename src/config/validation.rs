//! Configuration validation.
//!
//! # Responsibilities
//! - Presence checks for required fields
//! - Defaults (htdocs, GitHub endpoints)
//! - Route sanity (path/dest present, dest parses as a URL)
//! - Warnings for legal but suspicious setups (duplicate routes, half-configured TLS)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first, in document order
//! - Validation is a pure function of the document: same input, equal `Config`
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::config::document::{ConfigDocument, ProxyDocument};
use crate::config::loader::{ConfigError, RawDocument};
use crate::config::schema::{
    AuthSettings, Config, PathSettings, ProviderInfo, ProxyRoute, Secret, SessionSettings,
    SslSettings,
};

/// Default htdocs directory.
pub const DEFAULT_HTDOCS: &str = ".";

/// Authorization endpoint used for `service: github` when none is set.
pub const GITHUB_ENDPOINT: &str = "https://github.com";

/// API endpoint used for `service: github` when none is set.
pub const GITHUB_API_ENDPOINT: &str = "https://api.github.com";

/// A single semantic problem in the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent or empty.
    #[error("{0} config is required")]
    MissingField(String),

    /// A field is present but its value is unusable.
    #[error("{field} is invalid: {reason}")]
    InvalidField { field: String, reason: String },
}

impl ValidationError {
    /// Dotted name of the offending field, e.g. `auth.info.client_id`.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::MissingField(field) => field,
            ValidationError::InvalidField { field, .. } => field,
        }
    }
}

/// Validate a raw document and produce the immutable `Config`.
pub fn validate(doc: &RawDocument) -> Result<Config, ConfigError> {
    let document: ConfigDocument =
        serde_yaml::from_value(doc.value().clone()).map_err(ConfigError::Decode)?;

    let mut errors = Vec::new();

    let info = &document.auth.info;
    for (field, value) in [
        ("address", &document.address),
        ("auth.session.key", &document.auth.session.key),
        ("auth.info.service", &info.service),
        ("auth.info.client_id", &info.client_id),
        ("auth.info.client_secret", &info.client_secret),
        ("auth.info.redirect_url", &info.redirect_url),
    ] {
        if value.is_empty() {
            errors.push(ValidationError::MissingField(field.to_string()));
        }
    }

    let proxies: Vec<ProxyRoute> = document
        .proxy
        .iter()
        .enumerate()
        .filter_map(|(i, p)| check_route(i, p, &mut errors))
        .collect();

    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors));
    }

    let config = normalize(document, proxies);
    warn_suspicious(&config);
    Ok(config)
}

fn check_route(index: usize, doc: &ProxyDocument, errors: &mut Vec<ValidationError>) -> Option<ProxyRoute> {
    let before = errors.len();

    if doc.path.is_empty() {
        errors.push(ValidationError::MissingField(format!("proxy[{}].path", index)));
    }

    let dest = if doc.dest.is_empty() {
        errors.push(ValidationError::MissingField(format!("proxy[{}].dest", index)));
        None
    } else {
        match Url::parse(&doc.dest) {
            Ok(url) if url.cannot_be_a_base() => {
                errors.push(ValidationError::InvalidField {
                    field: format!("proxy[{}].dest", index),
                    reason: "not a base URL".to_string(),
                });
                None
            }
            Ok(url) => Some(url),
            Err(e) => {
                errors.push(ValidationError::InvalidField {
                    field: format!("proxy[{}].dest", index),
                    reason: e.to_string(),
                });
                None
            }
        }
    };

    if errors.len() != before {
        return None;
    }

    Some(ProxyRoute {
        path: doc.path.clone(),
        dest: doc.dest.clone(),
        dest_url: dest?,
        strip_path: doc.strip_path,
        host: non_empty(doc.host.clone()),
    })
}

fn normalize(document: ConfigDocument, proxies: Vec<ProxyRoute>) -> Config {
    let ConfigDocument {
        address,
        ssl,
        auth,
        restrictions,
        paths,
        htdocs,
        ..
    } = document;
    let info = auth.info;

    let is_github = info.service == "github";
    let mut endpoint = non_empty(info.endpoint);
    let mut api_endpoint = non_empty(info.api_endpoint);
    if is_github && endpoint.is_none() {
        endpoint = Some(GITHUB_ENDPOINT.to_string());
    }
    if is_github && api_endpoint.is_none() {
        api_endpoint = Some(GITHUB_API_ENDPOINT.to_string());
    }

    let htdocs = if htdocs.is_empty() {
        PathBuf::from(DEFAULT_HTDOCS)
    } else {
        PathBuf::from(htdocs)
    };

    Config {
        addr: address,
        ssl: SslSettings {
            cert: non_empty(ssl.cert).map(PathBuf::from),
            key: non_empty(ssl.key).map(PathBuf::from),
        },
        auth: AuthSettings {
            session: SessionSettings {
                key: Secret::new(auth.session.key),
                cookie_domain: non_empty(auth.session.cookie_domain),
            },
            info: ProviderInfo {
                service: info.service,
                client_id: info.client_id,
                client_secret: Secret::new(info.client_secret),
                redirect_url: info.redirect_url,
                endpoint,
                api_endpoint,
            },
        },
        proxies,
        restrictions,
        paths: PathSettings {
            login: non_empty(paths.login),
            logout: non_empty(paths.logout),
            callback: non_empty(paths.callback),
            error: non_empty(paths.error),
        },
        htdocs,
    }
}

fn warn_suspicious(config: &Config) {
    if config.ssl.cert.is_some() != config.ssl.key.is_some() {
        tracing::warn!("Only one of ssl.cert and ssl.key is set, TLS will not be enabled");
    }

    let mut seen = HashSet::new();
    for (i, route) in config.proxies.iter().enumerate() {
        if !seen.insert((route.host.as_deref(), route.path.as_str())) {
            tracing::warn!(
                index = i,
                path = %route.path,
                host = route.host.as_deref().unwrap_or("*"),
                "Duplicate proxy route is unreachable"
            );
        }
        if let Some(host) = &route.host {
            if host.chars().any(|c| c.is_ascii_uppercase()) {
                tracing::warn!(
                    index = i,
                    host = %host,
                    "Proxy host contains uppercase letters; host matching is case-sensitive"
                );
            }
        }
    }

    if config.restrictions.iter().any(String::is_empty) {
        tracing::warn!("Empty restriction entry allows every identity");
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::DocumentFormat;

    const VALID: &str = r#"
address: ":9999"
auth:
  session:
    key: secret
  info:
    service: google
    client_id: id
    client_secret: shh
    redirect_url: http://example.com/oauth2callback
"#;

    fn parse(yaml: &str) -> RawDocument {
        RawDocument::parse(yaml, DocumentFormat::Yaml).unwrap()
    }

    fn errors(yaml: &str) -> Vec<ValidationError> {
        match validate(&parse(yaml)) {
            Err(ConfigError::Validation(errors)) => errors,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_minimal() {
        let config = validate(&parse(VALID)).unwrap();
        assert_eq!(config.addr, ":9999");
        assert_eq!(config.htdocs, PathBuf::from("."));
        assert!(config.proxies.is_empty());
        assert!(config.restrictions.is_empty());
        assert_eq!(config.paths, PathSettings::default());
        assert_eq!(config.ssl, SslSettings::default());
        assert_eq!(config.auth.session.key.expose(), "secret");
        assert_eq!(config.auth.info.client_secret.expose(), "shh");
    }

    #[test]
    fn test_each_required_field_reported() {
        let cases = [
            ("address: \":9999\"\n", "address"),
            ("    key: secret\n", "auth.session.key"),
            ("    service: google\n", "auth.info.service"),
            ("    client_id: id\n", "auth.info.client_id"),
            ("    client_secret: shh\n", "auth.info.client_secret"),
            ("    redirect_url: http://example.com/oauth2callback\n", "auth.info.redirect_url"),
        ];

        for (line, field) in cases {
            let yaml = VALID.replace(line, "");
            assert_ne!(yaml, VALID, "fixture line not found: {}", line);
            let errs = errors(&yaml);
            assert_eq!(errs, vec![ValidationError::MissingField(field.to_string())]);
        }
    }

    #[test]
    fn test_errors_accumulate_in_order() {
        let errs = errors("htdocs: ./\n");
        let fields: Vec<&str> = errs.iter().map(|e| e.field()).collect();
        assert_eq!(
            fields,
            vec![
                "address",
                "auth.session.key",
                "auth.info.service",
                "auth.info.client_id",
                "auth.info.client_secret",
                "auth.info.redirect_url",
            ]
        );
    }

    #[test]
    fn test_github_defaults() {
        let yaml = VALID.replace("service: google", "service: github");
        let config = validate(&parse(&yaml)).unwrap();
        assert_eq!(config.auth.info.endpoint.as_deref(), Some(GITHUB_ENDPOINT));
        assert_eq!(config.auth.info.api_endpoint.as_deref(), Some(GITHUB_API_ENDPOINT));
    }

    #[test]
    fn test_github_defaults_are_independent() {
        let yaml = VALID.replace(
            "service: google",
            "service: github\n    endpoint: https://ghe.example.com",
        );
        let config = validate(&parse(&yaml)).unwrap();
        assert_eq!(config.auth.info.endpoint.as_deref(), Some("https://ghe.example.com"));
        assert_eq!(config.auth.info.api_endpoint.as_deref(), Some(GITHUB_API_ENDPOINT));
    }

    #[test]
    fn test_no_defaults_for_other_services() {
        let config = validate(&parse(VALID)).unwrap();
        assert_eq!(config.auth.info.endpoint, None);
        assert_eq!(config.auth.info.api_endpoint, None);
    }

    #[test]
    fn test_route_requires_path_and_dest() {
        let yaml = format!("{}proxy:\n  - dest: http://a\n  - path: /b\n", VALID);
        let errs = errors(&yaml);
        assert_eq!(
            errs,
            vec![
                ValidationError::MissingField("proxy[0].path".into()),
                ValidationError::MissingField("proxy[1].dest".into()),
            ]
        );
    }

    #[test]
    fn test_route_dest_must_be_url() {
        let yaml = format!("{}proxy:\n  - path: /a\n    dest: not a url\n", VALID);
        let errs = errors(&yaml);
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].field(), "proxy[0].dest");
        assert!(matches!(errs[0], ValidationError::InvalidField { .. }));
    }

    #[test]
    fn test_route_dest_kept_verbatim() {
        let yaml = format!("{}proxy:\n  - path: /\n    dest: http://Backend.Local:9200\n", VALID);
        let config = validate(&parse(&yaml)).unwrap();
        let route = &config.proxies[0];
        assert_eq!(route.dest, "http://Backend.Local:9200");
        assert_eq!(route.dest_url.host_str(), Some("backend.local"));
    }

    #[test]
    fn test_wrong_type_is_decode_error() {
        let yaml = format!("{}restrictions: {{a: b}}\n", VALID);
        let err = validate(&parse(&yaml)).unwrap_err();
        assert!(matches!(err, ConfigError::Decode(_)));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let yaml = format!(
            "{}proxy:\n  - path: /foo\n    dest: http://example.com/bar\n    strip_path: yes\nrestrictions: [a.com]\n",
            VALID
        );
        let doc = parse(&yaml);
        assert_eq!(validate(&doc).unwrap(), validate(&doc).unwrap());
    }

    #[test]
    fn test_error_message_names_field() {
        let err = validate(&parse("address: ':1'\n")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("invalid config: auth.session.key config is required"));
    }
}
