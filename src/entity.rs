//! Common serialization surface for result entities.
//!
//! Registrations and people are emitted as ordered JSON objects. The object
//! layout is owned by each entity's [`Entity::to_dict`], and the JSON helpers
//! are derived from it so every output path sees the same shape.

use serde_json::{Map, Value};

/// Ordered key/value form of an entity.
pub type Dict = Map<String, Value>;

/// Core trait for result entities.
///
/// # Example
///
/// ```ignore
/// use reggie::{Entity, Registration};
///
/// let reg = Registration::normalize(Some("NSW Board".into()), None, "expired", None);
/// assert_eq!(reg.to_dict()["reg_status"], "expired");
/// ```
pub trait Entity {
    /// Convert entity to its ordered dictionary representation
    fn to_dict(&self) -> Dict;

    /// Convert entity to a JSON value
    fn to_value(&self) -> Value {
        Value::Object(self.to_dict())
    }

    /// Convert entity to JSON string
    fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_value())
    }

    /// Convert entity to pretty-printed JSON string
    fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_value())
    }
}

/// Convert an optional string into a JSON value, `None` becoming `null`.
pub(crate) fn optional_string(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |s| Value::String(s.to_string()))
}
