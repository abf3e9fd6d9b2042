//! Shared fixtures for integration tests.

use std::io::Write;

use tempfile::NamedTempFile;

/// Required fields only, `google` provider.
pub const BASE: &str = r#"---
address: ":9999"

auth:
  session:
    key: secret

  info:
    service: 'google'
    client_id: 'secret client id'
    client_secret: 'secret client secret'
    redirect_url: 'http://example.com/oauth2callback'
"#;

/// Write `contents` to a temporary file with the given extension.
pub fn write_config(contents: &str, extension: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("gate-")
        .suffix(&format!(".{}", extension))
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Write a YAML document made of `BASE` plus `extra`.
#[allow(dead_code)]
pub fn write_yaml(extra: &str) -> NamedTempFile {
    write_config(&format!("{}\n{}", BASE, extra), "yml")
}
