//! End-to-end startup: file → Gate → dispatch and access queries.

use std::sync::Arc;
use std::thread;

use gate::auth::paths::{DEFAULT_CALLBACK_PATH, DEFAULT_LOGIN_PATH};
use gate::config::ConfigError;
use gate::lifecycle::bootstrap;

mod common;

const VHOSTS: &str = r#"
restrictions:
  - 'example1.com'
  - 'example2.com'

paths:
  logout: "/_gate_logout"
  error: "/_gate_error"

proxy:
  - path: /
    host: elasticsearch.example.com
    dest: http://127.0.0.1:9200
  - path: /
    host: influxdb.example.com
    dest: http://127.0.0.1:8086
  - path: /static
    dest: http://cdn.example.com/assets
    strip_path: yes
"#;

#[test]
fn test_bootstrap_dispatch() {
    let file = common::write_yaml(VHOSTS);
    let gate = bootstrap(file.path()).unwrap();

    assert_eq!(gate.routes.len(), 3);

    let m = gate.routes.find("elasticsearch.example.com", "/").unwrap();
    assert_eq!(m.index, 0);
    assert_eq!(m.route.dest, "http://127.0.0.1:9200");

    let m = gate.routes.find("influxdb.example.com", "/write").unwrap();
    assert_eq!(m.index, 1);
    assert_eq!(m.forward_path, "/write");

    let m = gate.routes.find("www.example.com", "/static/app.js").unwrap();
    assert_eq!(m.index, 2);
    assert_eq!(m.forward_path, "/app.js");
    assert_eq!(
        m.route.upstream_url(&m.forward_path, Some("v=3")).as_str(),
        "http://cdn.example.com/assets/app.js?v=3"
    );

    assert!(gate.routes.find("www.example.com", "/index.html").is_none());
}

#[test]
fn test_bootstrap_access_policy() {
    let file = common::write_yaml(VHOSTS);
    let gate = bootstrap(file.path()).unwrap();

    assert!(gate.access.is_allowed("alice@example1.com"));
    assert!(gate.access.is_allowed("bob@EXAMPLE2.com"));
    assert!(!gate.access.is_allowed("eve@example3.com"));
}

#[test]
fn test_bootstrap_unrestricted() {
    let file = common::write_yaml("");
    let gate = bootstrap(file.path()).unwrap();

    assert!(!gate.access.is_restricted());
    assert!(gate.access.is_allowed("anyone@anywhere.org"));
    assert!(gate.routes.is_empty());
}

#[test]
fn test_bootstrap_applies_path_overrides() {
    let file = common::write_yaml(VHOSTS);
    let gate = bootstrap(file.path()).unwrap();

    assert_eq!(gate.auth_paths.login, DEFAULT_LOGIN_PATH);
    assert_eq!(gate.auth_paths.logout, "/_gate_logout");
    assert_eq!(gate.auth_paths.callback, DEFAULT_CALLBACK_PATH);
    assert_eq!(gate.auth_paths.error, "/_gate_error");
}

#[test]
fn test_bootstrap_fails_on_invalid_config() {
    let file = common::write_config("address: ':9999'\n", "yml");
    let err = bootstrap(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
    assert!(err.to_string().contains("auth.session.key"));
}

#[test]
fn test_shared_across_threads() {
    let file = common::write_yaml(VHOSTS);
    let gate = bootstrap(file.path()).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let routes = Arc::clone(&gate.routes);
            let access = Arc::clone(&gate.access);
            thread::spawn(move || {
                for _ in 0..100 {
                    assert_eq!(routes.find("influxdb.example.com", "/").unwrap().index, 1);
                    assert!(access.is_allowed("carol@example2.com"));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
