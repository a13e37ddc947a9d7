use serde::{Deserialize, Serialize};
use serde_json::Map;

/// Structured value decoded from a verbose entry (string, number, bool, null,
/// array or object).
pub use serde_json::Value;

/// Decoded verbose object attached to an account or calendar.
///
/// Keys are whatever the logging process emitted; nothing beyond string keys
/// is guaranteed, so every accessor is lookup-or-none.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtraData(Map<String, Value>);

impl ExtraData {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Wrap a decoded value; only objects qualify.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_string_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Numeric field, also accepting numeric strings.
    ///
    /// Bare decimals in verbose entries are quoted during normalization, so
    /// `0.5` usually arrives as the string `"0.5"`.
    pub fn get_number_field(&self, key: &str) -> Option<f64> {
        match self.0.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Field used as an identifier: strings as-is, numbers in decimal.
    pub fn identifier_field(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for ExtraData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
