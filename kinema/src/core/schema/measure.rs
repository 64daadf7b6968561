use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A physical quantity that may be absent.
///
/// `Measure` is the absence sentinel of the schema: an absent value
/// serializes as `null` and is kept distinct from zero. Construction
/// discards non-finite numbers, so a present `Measure` is always finite.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Measure(Option<f64>);

impl Measure {
    pub const ABSENT: Measure = Measure(None);

    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(Some(value))
        } else {
            Self::ABSENT
        }
    }

    /// Lenient coercion from loosely typed input.
    ///
    /// Numbers and numeric-looking strings become present; anything else
    /// (booleans, records, empty strings, `"NaN"`) is absent.
    pub fn coerce(value: &Value) -> Self {
        match value {
            Value::Number(n) => n.as_f64().map(Self::new).unwrap_or_default(),
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Self::ABSENT;
                }
                trimmed.parse::<f64>().map(Self::new).unwrap_or_default()
            }
            _ => Self::ABSENT,
        }
    }

    pub fn get(self) -> Option<f64> {
        self.0
    }

    pub fn is_present(self) -> bool {
        self.0.is_some()
    }

    pub fn is_absent(self) -> bool {
        self.0.is_none()
    }

    /// Value, or `fallback` when absent.
    pub fn or(self, fallback: f64) -> f64 {
        self.0.unwrap_or(fallback)
    }

    /// Value, or `fallback` when absent or exactly zero.
    pub fn nonzero_or(self, fallback: f64) -> f64 {
        match self.0 {
            Some(v) if v != 0.0 => v,
            _ => fallback,
        }
    }

    /// Present and non-zero value.
    pub fn nonzero(self) -> Option<f64> {
        self.0.filter(|v| *v != 0.0)
    }

    pub fn set(&mut self, value: f64) {
        *self = Self::new(value);
    }

    /// Stores `value` only while the field is still absent.
    ///
    /// Returns whether the field was written.
    pub fn fill(&mut self, value: Option<f64>) -> bool {
        match (self.0, value) {
            (None, Some(v)) if v.is_finite() => {
                self.0 = Some(v);
                true
            }
            _ => false,
        }
    }
}

impl From<f64> for Measure {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Option<f64>> for Measure {
    fn from(value: Option<f64>) -> Self {
        value.map(Self::new).unwrap_or_default()
    }
}

impl Serialize for Measure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(v) => serializer.serialize_f64(v),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Measure {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::coerce(&value))
    }
}

/// A free-form label that is never coerced to a number.
///
/// Used for `topic`-like fields (`sub_topic`, `object`, `type`,
/// `direction`, `phenomena`). Numbers given for a label keep their decimal
/// text; empty strings and every other shape are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text(Option<String>);

impl Text {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            Self(None)
        } else {
            Self(Some(value))
        }
    }

    pub fn coerce(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::new(s.as_str()),
            Value::Number(n) => Self::new(n.to_string()),
            _ => Self(None),
        }
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.as_deref().unwrap_or(fallback)
    }

    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    /// Lower-cased label, empty when absent.
    pub fn lowercase(&self) -> String {
        self.as_deref().map(str::to_lowercase).unwrap_or_default()
    }
}

impl Serialize for Text {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(s) => serializer.serialize_str(s),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::coerce(&value))
    }
}
