//! Dynamic values read from a source mapping.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

/// A loosely typed value held by a [`SourceMap`].
///
/// Secret stores hand back untyped payloads, so the mapping side of a bind is
/// dynamic even though the record side is static. A key that is present with
/// [`Value::Null`] is treated the same as an absent key: the target field
/// keeps its current value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// An explicit null. Never assigned to a field.
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the contained string, if this is a [`Value::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

/// The textual rendition assigned to a string field when the looked-up value
/// is not already a string.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl From<toml::Value> for Value {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Value::String(s),
            toml::Value::Integer(i) => Value::Integer(i),
            toml::Value::Float(x) => Value::Float(x),
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::Datetime(dt) => Value::String(dt.to_string()),
            // Arrays and tables have no scalar rendition; Null keeps them on
            // the skip path.
            toml::Value::Array(_) | toml::Value::Table(_) => Value::Null,
        }
    }
}

/// An unordered mapping of lookup keys to dynamic values.
///
/// Produced by whatever fetched the secrets (a vault client, a file loader)
/// and handed to [`bind()`](crate::bind()) read-only. Deserializes transparently
/// from a plain key/value object:
///
/// ```
/// use vaultbind::{SourceMap, Value};
///
/// let source: SourceMap =
///     serde_json::from_str(r#"{"db_host": "localhost", "db_port": 5432}"#)?;
/// assert_eq!(source.get("db_port"), Some(&Value::Integer(5432)));
/// # Ok::<(), serde_json::Error>(())
/// ```
///
/// or converts from a parsed TOML table:
///
/// ```
/// use vaultbind::SourceMap;
///
/// let table: toml::Table = toml::from_str("api_key = \"abcd1234\"")?;
/// let source = SourceMap::from(table);
/// assert_eq!(source.get("api_key").and_then(|v| v.as_str()), Some("abcd1234"));
/// # Ok::<(), toml::de::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct SourceMap(HashMap<String, Value>);

impl SourceMap {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a key. Absent keys return `None`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Inserts a value, returning the previous one if the key was present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, Value>> for SourceMap {
    fn from(entries: HashMap<String, Value>) -> Self {
        Self(entries)
    }
}

impl From<toml::Table> for SourceMap {
    fn from(table: toml::Table) -> Self {
        Self(table.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for SourceMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_renders_scalars() {
        assert_eq!(Value::String("admin".into()).to_string(), "admin");
        assert_eq!(Value::Integer(12345).to_string(), "12345");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Bool(true).to_string(), "true");
    }

    #[test]
    fn test_option_converts_to_null() {
        assert_eq!(Value::from(None::<&str>), Value::Null);
        assert_eq!(Value::from(Some("set")), Value::String("set".into()));
    }

    #[test]
    fn test_toml_table_conversion() {
        let table: toml::Table = toml::from_str(
            r#"
            host = "localhost"
            port = 5432
            ratio = 0.5
            enabled = true
            tags = ["a", "b"]
            "#,
        )
        .unwrap();

        let source = SourceMap::from(table);
        assert_eq!(source.get("host"), Some(&Value::String("localhost".into())));
        assert_eq!(source.get("port"), Some(&Value::Integer(5432)));
        assert_eq!(source.get("ratio"), Some(&Value::Float(0.5)));
        assert_eq!(source.get("enabled"), Some(&Value::Bool(true)));
        // Non-scalar entries land on the skip path.
        assert_eq!(source.get("tags"), Some(&Value::Null));
        assert_eq!(source.get("absent"), None);
    }

    #[test]
    fn test_json_payload_deserializes() {
        let source: SourceMap = serde_json::from_str(
            r#"{
                "username": "admin",
                "retries": 3,
                "debug": false,
                "unset": null
            }"#,
        )
        .unwrap();

        assert_eq!(source.len(), 4);
        assert_eq!(source.get("username").and_then(|v| v.as_str()), Some("admin"));
        assert_eq!(source.get("retries"), Some(&Value::Integer(3)));
        assert_eq!(source.get("debug"), Some(&Value::Bool(false)));
        assert!(source.get("unset").is_some_and(Value::is_null));
    }
}
