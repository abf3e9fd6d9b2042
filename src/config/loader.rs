//! Configuration loading from disk.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use thiserror::Error;

use crate::config::schema::Config;
use crate::config::validation::{validate, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be opened or read.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed.
    #[error("failed to parse config: {0}")]
    Parse(#[from] ParseError),

    /// The document is well-formed but a value has the wrong type.
    #[error("failed to decode config: {0}")]
    Decode(#[source] serde_yaml::Error),

    /// Required fields are missing or invalid.
    #[error("invalid config: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

/// Syntax errors from the document parsers.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Document syntax, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Toml,
}

impl DocumentFormat {
    /// `.toml` files are TOML; anything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => DocumentFormat::Toml,
            _ => DocumentFormat::Yaml,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Yaml => f.write_str("yaml"),
            DocumentFormat::Toml => f.write_str("toml"),
        }
    }
}

/// A parsed but not yet validated configuration document.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    value: Value,
}

impl RawDocument {
    /// Parse document text.
    ///
    /// An empty document is treated as an empty mapping so that validation
    /// reports the missing fields instead of a type error.
    pub fn parse(content: &str, format: DocumentFormat) -> Result<Self, ParseError> {
        if content.trim().is_empty() {
            return Ok(Self {
                value: Value::Mapping(Mapping::new()),
            });
        }

        let value = match format {
            DocumentFormat::Yaml => serde_yaml::from_str(content)?,
            DocumentFormat::Toml => {
                let table: toml::Value = toml::from_str(content)?;
                serde_yaml::to_value(table)?
            }
        };

        let value = match value {
            Value::Null => Value::Mapping(Mapping::new()),
            other => other,
        };

        Ok(Self { value })
    }

    /// The underlying key/value tree.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Read and parse a configuration document without validating it.
pub fn load(path: &Path) -> Result<RawDocument, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let format = DocumentFormat::from_path(path);
    let doc = RawDocument::parse(&content, format)?;

    tracing::debug!(path = %path.display(), format = %format, "Configuration document parsed");
    Ok(doc)
}

/// Load and validate configuration from a YAML or TOML file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let doc = load(path)?;
    validate(&doc)
}
