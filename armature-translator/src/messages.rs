//! Message Maps
//!
//! A [`MessageMap`] maps translation keys to message patterns. Patterns may
//! contain printf-style positional placeholders (see [`crate::format`]).
//!
//! Resources are JSON or TOML documents. Nested tables flatten into dotted
//! keys, so `{"user": {"name": "Name"}}` yields the key `user.name`.

use crate::{Result, TranslatorError};
use std::collections::HashMap;

/// Mapping from translation key to message pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageMap {
    messages: HashMap<String, String>,
}

impl MessageMap {
    /// Create a new empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from JSON.
    ///
    /// The document must be an object (or `null`, which yields an empty map).
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let mut map = Self::new();

        match value {
            serde_json::Value::Null => {}
            serde_json::Value::Object(obj) => map.flatten_json("", obj)?,
            other => {
                return Err(TranslatorError::ParseError(format!(
                    "expected an object of messages, found {}",
                    json_kind(&other)
                )));
            }
        }

        Ok(map)
    }

    /// Load from TOML.
    pub fn from_toml(source: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(source)?;
        let mut map = Self::new();
        map.flatten_toml("", table)?;
        Ok(map)
    }

    fn flatten_json(
        &mut self,
        prefix: &str,
        obj: serde_json::Map<String, serde_json::Value>,
    ) -> Result<()> {
        for (key, value) in obj {
            let key = join_key(prefix, &key);
            match value {
                serde_json::Value::String(s) => {
                    self.messages.insert(key, s);
                }
                serde_json::Value::Number(n) => {
                    self.messages.insert(key, n.to_string());
                }
                serde_json::Value::Bool(b) => {
                    self.messages.insert(key, b.to_string());
                }
                serde_json::Value::Object(nested) => self.flatten_json(&key, nested)?,
                serde_json::Value::Null => {}
                serde_json::Value::Array(_) => {
                    return Err(TranslatorError::ParseError(format!(
                        "message {} is an array",
                        key
                    )));
                }
            }
        }
        Ok(())
    }

    fn flatten_toml(&mut self, prefix: &str, table: toml::Table) -> Result<()> {
        for (key, value) in table {
            let key = join_key(prefix, &key);
            match value {
                toml::Value::String(s) => {
                    self.messages.insert(key, s);
                }
                toml::Value::Integer(i) => {
                    self.messages.insert(key, i.to_string());
                }
                toml::Value::Float(f) => {
                    self.messages.insert(key, f.to_string());
                }
                toml::Value::Boolean(b) => {
                    self.messages.insert(key, b.to_string());
                }
                toml::Value::Datetime(dt) => {
                    self.messages.insert(key, dt.to_string());
                }
                toml::Value::Table(nested) => self.flatten_toml(&key, nested)?,
                toml::Value::Array(_) => {
                    return Err(TranslatorError::ParseError(format!(
                        "message {} is an array",
                        key
                    )));
                }
            }
        }
        Ok(())
    }

    /// Add a message, replacing any existing pattern for the key.
    pub fn insert(&mut self, key: impl Into<String>, pattern: impl Into<String>) {
        self.messages.insert(key.into(), pattern.into());
    }

    /// Get a message pattern.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(|s| s.as_str())
    }

    /// Check if the map has a key.
    pub fn contains(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Get all message keys.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.messages.keys()
    }

    /// Iterate over `(key, pattern)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.messages.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merge `other` into this map. Keys from `other` win on conflict.
    pub fn extend_from(&mut self, other: MessageMap) {
        self.messages.extend(other.messages);
    }
}

impl From<HashMap<String, String>> for MessageMap {
    fn from(messages: HashMap<String, String>) -> Self {
        Self { messages }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MessageMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            messages: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Merge two maps into a new one. Entries in `overrides` win on conflict.
pub fn merge_messages(existing: &MessageMap, overrides: &MessageMap) -> MessageMap {
    let mut merged = existing.clone();
    merged.extend_from(overrides.clone());
    merged
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
