//! Coercion of string-typed request values
//!
//! Path and query parameters arrive as strings. Fields that declare a
//! [`Transform`] are converted after they pass their own checks.

use hire_schema::Transform;
use serde_json::{Number, Value};

/// Parse a numeric string: integers that fit `u64` stay integers
pub fn to_number(raw: &str) -> Option<Number> {
    if let Ok(n) = raw.parse::<u64>() {
        return Some(Number::from(n));
    }
    raw.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Whether `raw` can be converted by `transform`
pub fn can_apply(transform: Transform, raw: &str) -> bool {
    match transform {
        Transform::ToNumber => to_number(raw).is_some(),
        Transform::ToBool => true,
    }
}

/// Convert a string that already passed its checks.
///
/// A string that cannot be converted is returned unchanged; the engine
/// reports it before this point.
pub fn apply(transform: Transform, raw: &str) -> Value {
    match transform {
        Transform::ToNumber => match to_number(raw) {
            Some(n) => Value::Number(n),
            None => Value::String(raw.to_string()),
        },
        Transform::ToBool => Value::Bool(raw == "true"),
    }
}
