//! Raw document shape as decoded from YAML/TOML.
//!
//! Every field is optional at this layer and a YAML `null` is read as "absent".
//! String fields only take strings: an unquoted `key: 1.50` has already been
//! parsed as a number, so it is rejected rather than silently read as `1.5`.
//! Presence checks happen in `validation.rs`.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ConfigDocument {
    #[serde(deserialize_with = "scalar_string")]
    pub address: String,
    #[serde(deserialize_with = "nullable")]
    pub ssl: SslDocument,
    #[serde(deserialize_with = "nullable")]
    pub auth: AuthDocument,
    #[serde(deserialize_with = "nullable")]
    pub restrictions: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub proxy: Vec<ProxyDocument>,
    #[serde(deserialize_with = "nullable")]
    pub paths: PathsDocument,
    #[serde(deserialize_with = "scalar_string")]
    pub htdocs: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SslDocument {
    #[serde(deserialize_with = "scalar_string")]
    pub cert: String,
    #[serde(deserialize_with = "scalar_string")]
    pub key: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AuthDocument {
    #[serde(deserialize_with = "nullable")]
    pub session: SessionDocument,
    #[serde(deserialize_with = "nullable")]
    pub info: InfoDocument,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SessionDocument {
    #[serde(deserialize_with = "scalar_string")]
    pub key: String,
    #[serde(deserialize_with = "scalar_string")]
    pub cookie_domain: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct InfoDocument {
    #[serde(deserialize_with = "scalar_string")]
    pub service: String,
    #[serde(deserialize_with = "scalar_string")]
    pub client_id: String,
    #[serde(deserialize_with = "scalar_string")]
    pub client_secret: String,
    #[serde(deserialize_with = "scalar_string")]
    pub redirect_url: String,
    #[serde(deserialize_with = "scalar_string")]
    pub endpoint: String,
    #[serde(deserialize_with = "scalar_string")]
    pub api_endpoint: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ProxyDocument {
    #[serde(deserialize_with = "scalar_string")]
    pub path: String,
    #[serde(deserialize_with = "scalar_string")]
    pub dest: String,
    #[serde(deserialize_with = "loose_bool")]
    pub strip_path: bool,
    #[serde(deserialize_with = "scalar_string")]
    pub host: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct PathsDocument {
    #[serde(deserialize_with = "scalar_string")]
    pub login: String,
    #[serde(deserialize_with = "scalar_string")]
    pub logout: String,
    #[serde(deserialize_with = "scalar_string")]
    pub callback: String,
    #[serde(deserialize_with = "scalar_string")]
    pub error: String,
}

/// Decode `T`, reading an explicit null as `T::default()`.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScalarVisitor;

    impl<'de> Visitor<'de> for ScalarVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string (quote numeric or boolean values, e.g. key: '1.50')")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_owned())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_unit<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<String, D::Error> {
            d.deserialize_any(ScalarVisitor)
        }
    }

    deserializer.deserialize_any(ScalarVisitor)
}

/// Booleans in either YAML 1.2 (`true`/`false`) or YAML 1.1 spelling
/// (`yes`/`no`/`on`/`off`/`y`/`n`). Existing gate configs use `strip_path: yes`.
fn loose_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct BoolVisitor;

    impl<'de> Visitor<'de> for BoolVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean (true/false/yes/no/on/off)")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
            match v.to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" | "on" => Ok(true),
                "false" | "no" | "n" | "off" | "" => Ok(false),
                _ => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
            }
        }

        fn visit_unit<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }

        fn visit_none<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<bool, D::Error> {
            d.deserialize_any(BoolVisitor)
        }
    }

    deserializer.deserialize_any(BoolVisitor)
}
