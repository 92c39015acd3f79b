//! Field accessors for feed entries.
//!
//! Feed services are loose about types: numeric fields usually arrive as
//! strings (`"field1": "12.5"`) and identifiers as numbers
//! (`"entry_id": 42`). These accessors accept both spellings.

use serde_json::{Map, Value};

use crate::error::FeedError;

/// Read a numeric field, accepting JSON numbers and numeric strings.
///
/// Absent and `null` fields are [`FeedError::MissingField`]; anything that
/// does not hold a finite number is [`FeedError::InvalidNumber`].
pub fn get_f64(entry: &Map<String, Value>, field: &str) -> Result<f64, FeedError> {
    let invalid = |value: String| FeedError::InvalidNumber {
        field: field.to_string(),
        value,
    };

    let value = match entry.get(field) {
        None | Some(Value::Null) => return Err(FeedError::MissingField(field.to_string())),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| invalid(n.to_string()))?,
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| invalid(s.clone()))?,
        Some(other) => return Err(invalid(other.to_string())),
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid(value.to_string()))
    }
}

/// Read a field as text. Non-string values are rendered as JSON text.
pub fn get_string(entry: &Map<String, Value>, field: &str) -> Result<String, FeedError> {
    match entry.get(field) {
        None | Some(Value::Null) => Err(FeedError::MissingField(field.to_string())),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Ok(other.to_string()),
    }
}
