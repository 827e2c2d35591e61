//! Helpers over [`serde_json::Value`] slots.

use std::borrow::Cow;

use serde_json::Value;

/// Truthiness of a form slot.
///
/// Absent, `null`, `false`, `0` and `""` are falsy. Containers are truthy even
/// when empty.
pub fn is_falsy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => false,
    }
}

/// Text form of a value for pattern matching: strings as-is, everything else
/// as its JSON text.
pub fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}
