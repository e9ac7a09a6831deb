//! Raw events as handed over by a trace decoder.
//!
//! A raw event is a name, a clock snapshot in nanoseconds from the trace
//! origin, and a flat payload of named fields.

use crate::utils::error::ConvertError;
use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A single payload field value
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Interpret the value as a non-negative integer (track ids, ports)
    ///
    /// Floats are truncated and strings parsed as decimal.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            FieldValue::Integer(i) => u64::try_from(*i).ok(),
            FieldValue::Unsigned(u) => Some(*u),
            FieldValue::Float(f) if f.is_finite() && *f >= 0.0 => Some(f.trunc() as u64),
            FieldValue::Float(_) => None,
            FieldValue::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Integer-coerce the value for display in `args`
    ///
    /// **Public** - used by every handler that forwards payload fields
    ///
    /// Strings that are not integers are kept as they are.
    pub fn coerced(&self) -> Value {
        match self {
            FieldValue::Integer(i) => Value::from(*i),
            FieldValue::Unsigned(u) => Value::from(*u),
            FieldValue::Float(f) if f.is_finite() => Value::from(f.trunc() as i64),
            FieldValue::Float(f) => Value::from(*f),
            FieldValue::Text(s) => {
                let trimmed = s.trim();
                if let Ok(i) = trimmed.parse::<i64>() {
                    Value::from(i)
                } else if let Ok(u) = trimmed.parse::<u64>() {
                    Value::from(u)
                } else {
                    debug!("Keeping non-integer field value '{}' as text", s);
                    Value::from(s.clone())
                }
            }
        }
    }

    /// Render the value as plain text (labels, names)
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Unsigned(u) => u.to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Text(s) => s.clone(),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value.into())
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Unsigned(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// One event from the raw-event source
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawEvent {
    /// Event kind, e.g. `thread_switched_in`
    pub name: String,

    /// Clock snapshot in nanoseconds from the trace origin
    pub timestamp_ns: u64,

    /// Event-specific fields
    #[serde(default)]
    pub payload: BTreeMap<String, FieldValue>,
}

impl RawEvent {
    /// Create an event with an empty payload
    pub fn new(name: impl Into<String>, timestamp_ns: u64) -> Self {
        Self {
            name: name.into(),
            timestamp_ns,
            payload: BTreeMap::new(),
        }
    }

    /// Builder-style payload field insertion
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Timestamp in microseconds with nanosecond resolution
    pub fn timestamp_us(&self) -> f64 {
        self.timestamp_ns as f64 / 1000.0
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.payload.get(key)
    }

    /// Read a mandatory integer field (track ids, ports)
    ///
    /// # Errors
    /// * `ConvertError::MissingField` - field absent
    /// * `ConvertError::InvalidField` - field is not a non-negative integer
    pub fn require_u64(&self, field: &'static str) -> Result<u64, ConvertError> {
        let value = self.field(field).ok_or_else(|| ConvertError::MissingField {
            event: self.name.clone(),
            field,
        })?;

        value.as_u64().ok_or_else(|| ConvertError::InvalidField {
            event: self.name.clone(),
            field,
        })
    }

    /// Integer-coerced copy of the payload, minus the `skip` fields
    pub fn coerced_payload(&self, skip: &[&str]) -> Map<String, Value> {
        self.payload
            .iter()
            .filter(|(key, _)| !skip.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.coerced()))
            .collect()
    }
}
