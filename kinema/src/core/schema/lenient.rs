//! `deserialize_with` adapters that never fail.
//!
//! External input is produced by a language model and is routinely the
//! wrong shape. Each adapter reads a raw [`Value`] and degrades to the
//! field's default instead of rejecting the whole document.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use super::measure::Measure;
use super::topic::Topic;

/// A nested record. Non-objects become the record's defaults.
pub fn record<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        if !value.is_null() {
            warn!(target: "normalize", "expected a record, found {}; using defaults", kind(&value));
        }
        return Ok(T::default());
    }
    Ok(T::deserialize(value).unwrap_or_else(|err| {
        warn!(target: "normalize", %err, "malformed record; using defaults");
        T::default()
    }))
}

/// A sequence field. Non-arrays become empty; elements are coerced one by one.
pub fn sequence<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        if !value.is_null() {
            warn!(target: "normalize", "expected a sequence, found {}; using []", kind(&value));
        }
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| T::deserialize(item).ok())
        .collect())
}

/// A sequence of strings. Non-string elements are dropped.
pub fn strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect()),
        _ => Ok(Vec::new()),
    }
}

/// The name -> number map. Entries that do not coerce to a finite number are dropped.
pub fn calculations<'de, D>(deserializer: D) -> Result<IndexMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Object(entries) = value else {
        return Ok(IndexMap::new());
    };
    Ok(entries
        .into_iter()
        .filter_map(|(key, v)| Measure::coerce(&v).get().map(|n| (key, n)))
        .collect())
}

pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(matches!(value, Value::Bool(true)))
}

/// The problem topic, fuzzy matched against [`Topic::ALL`].
pub fn topic<'de, D>(deserializer: D) -> Result<Topic, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::String(raw) = value else {
        return Ok(Topic::default());
    };
    Ok(Topic::resolve(&raw).unwrap_or_else(|| {
        if !raw.trim().is_empty() {
            warn!(target: "normalize", topic = %raw, "unknown topic; defaulting to {}", Topic::default());
        }
        Topic::default()
    }))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a record",
    }
}
