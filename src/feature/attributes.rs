//! Typed attribute values and their JSON text form

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use std::fmt;

use crate::errors::{FeatureError, FeatureResult};

/// Attribute map of a feature; keys are unique, order is irrelevant
pub type Attributes = HashMap<String, AttributeValue>;

/// A single attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
    /// Stored as RFC 3339 text; reads back as `String`
    Timestamp(DateTime<Utc>),
}

impl AttributeValue {
    /// Short name of the value kind
    pub fn kind(&self) -> &'static str {
        match self {
            AttributeValue::String(_) => "string",
            AttributeValue::Integer(_) => "integer",
            AttributeValue::Float(_) => "float",
            AttributeValue::Boolean(_) => "boolean",
            AttributeValue::Null => "null",
            AttributeValue::Timestamp(_) => "timestamp",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric value; integers widen to f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(f) => Some(*f),
            AttributeValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Timestamp value, also parsing RFC 3339 strings read back from storage
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            AttributeValue::Timestamp(t) => Some(*t),
            AttributeValue::String(s) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|t| t.with_timezone(&Utc)),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    /// JSON form of the value
    ///
    /// Non-finite floats have no JSON representation and become `null`.
    pub fn to_json(&self) -> Value {
        match self {
            AttributeValue::String(s) => Value::String(s.clone()),
            AttributeValue::Integer(i) => Value::Number(Number::from(*i)),
            AttributeValue::Float(f) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
            AttributeValue::Boolean(b) => Value::Bool(*b),
            AttributeValue::Null => Value::Null,
            AttributeValue::Timestamp(t) => Value::String(t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        }
    }

    /// Converts a scalar JSON value; arrays and objects are rejected
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(AttributeValue::String(s.clone())),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(AttributeValue::Integer(i)),
                None => n.as_f64().map(AttributeValue::Float),
            },
            Value::Bool(b) => Some(AttributeValue::Boolean(*b)),
            Value::Null => Some(AttributeValue::Null),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(s) => write!(f, "{}", s),
            AttributeValue::Integer(i) => write!(f, "{}", i),
            AttributeValue::Float(v) => write!(f, "{}", v),
            AttributeValue::Boolean(b) => write!(f, "{}", b),
            AttributeValue::Null => write!(f, "null"),
            AttributeValue::Timestamp(t) => write!(f, "{}", t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Integer(value as i64)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Boolean(value)
    }
}

impl From<DateTime<Utc>> for AttributeValue {
    fn from(value: DateTime<Utc>) -> Self {
        AttributeValue::Timestamp(value)
    }
}

impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(AttributeValue::Null)
    }
}

/// Serializes an attribute map to a flat JSON object
///
/// Keys come out sorted, so equal maps always produce equal text.
pub fn attributes_to_json(attributes: &Attributes) -> String {
    let map: Map<String, Value> = attributes
        .iter()
        .map(|(k, v)| (k.clone(), v.to_json()))
        .collect();
    Value::Object(map).to_string()
}

/// Parses the flat JSON object written by [`attributes_to_json`]
pub fn attributes_from_json(text: &str) -> FeatureResult<Attributes> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| FeatureError::InvalidAttributes(format!("invalid attribute JSON: {}", e)))?;

    let object = match value {
        Value::Object(object) => object,
        other => {
            return Err(FeatureError::InvalidAttributes(format!(
                "attribute JSON must be an object, found {}",
                json_kind(&other)
            )))
        },
    };

    let mut attributes = Attributes::with_capacity(object.len());
    for (key, value) in &object {
        let value = AttributeValue::from_json(value).ok_or_else(|| {
            FeatureError::InvalidAttributes(format!(
                "attribute '{}' holds a nested {}",
                key,
                json_kind(value)
            ))
        })?;
        attributes.insert(key.clone(), value);
    }

    Ok(attributes)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
