//! Validation rules
//!
//! Each function checks one constraint of one value and words the default
//! message. The engine substitutes a schema-supplied message when the check
//! carries one.

use chrono::{DateTime, Utc};
use hire_schema::{
    ArrayCheck, EnumSet, FieldRule, NumberCheck, StringCheck, StringFormat, Temporal,
};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Tolerance for multiple-of checks on binary floats
const STEP_EPSILON: f64 = 1e-9;

// Labels of the domain part are non-empty.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").expect("email pattern compiles")
});

/// Validation rule result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleResult {
    pub is_valid: bool,
    pub message: Option<String>,
}

impl RuleResult {
    #[must_use]
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: Some(message.into()),
        }
    }

    fn check(ok: bool, message: impl FnOnce() -> String) -> Self {
        if ok { Self::valid() } else { Self::invalid(message()) }
    }
}

/// JSON type name as reported in type mismatches
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Check that a value has the shape a rule expects.
///
/// Enumerations, literals and timestamps only need a string here; their
/// token and format are constraints.
#[must_use]
pub fn validate_kind(rule: &FieldRule, value: &Value) -> RuleResult {
    let ok = match rule {
        FieldRule::String(_) | FieldRule::DateTime(_) | FieldRule::Enum(_) | FieldRule::Literal(_) => {
            value.is_string()
        }
        FieldRule::Number(_) => value.as_f64().is_some_and(f64::is_finite),
        FieldRule::Boolean => value.is_boolean(),
        FieldRule::Array(_) => value.is_array(),
        FieldRule::Object(_) | FieldRule::Record(_) => value.is_object(),
        FieldRule::Any => true,
    };
    RuleResult::check(ok, || {
        format!(
            "Expected {}, received {}",
            rule.kind_name(),
            json_type_name(value)
        )
    })
}

/// Validate one string constraint; lengths count Unicode scalar values
#[must_use]
pub fn validate_string(field: &str, value: &str, check: &StringCheck) -> RuleResult {
    let len = value.chars().count();
    match check {
        StringCheck::MinLength(min) => RuleResult::check(len >= *min, || {
            format!("{field} must be at least {min} characters")
        }),
        StringCheck::MaxLength(max) => RuleResult::check(len <= *max, || {
            format!("{field} must be at most {max} characters")
        }),
        StringCheck::Length(exact) => RuleResult::check(len == *exact, || {
            format!("{field} must be exactly {exact} characters")
        }),
        StringCheck::Pattern(pattern) => RuleResult::check(pattern.is_match(value), || {
            format!("{field} has an invalid format")
        }),
        StringCheck::Format(format) => validate_format(field, value, *format),
    }
}

/// Validate a well-known string format
#[must_use]
pub fn validate_format(field: &str, value: &str, format: StringFormat) -> RuleResult {
    match format {
        StringFormat::Email => RuleResult::check(is_email(value), || {
            format!("{field} must be a valid email address")
        }),
        StringFormat::Url => RuleResult::check(url::Url::parse(value).is_ok(), || {
            format!("{field} must be a valid URL")
        }),
        StringFormat::Uuid => RuleResult::check(is_hyphenated_uuid(value), || {
            format!("{field} must be a valid UUID")
        }),
    }
}

fn is_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

// Uuid::parse_str also takes the simple, braced and URN forms.
fn is_hyphenated_uuid(value: &str) -> bool {
    value.len() == 36 && uuid::Uuid::parse_str(value).is_ok()
}

/// Validate one numeric constraint
#[must_use]
pub fn validate_number(field: &str, value: f64, check: NumberCheck) -> RuleResult {
    match check {
        NumberCheck::Min(min) => {
            RuleResult::check(value >= min, || format!("{field} must be at least {min}"))
        }
        NumberCheck::Max(max) => {
            RuleResult::check(value <= max, || format!("{field} must be at most {max}"))
        }
        NumberCheck::GreaterThan(bound) => RuleResult::check(value > bound, || {
            format!("{field} must be greater than {bound}")
        }),
        NumberCheck::MultipleOf(step) => RuleResult::check(is_multiple_of(value, step), || {
            format!("{field} must be a multiple of {step}")
        }),
        NumberCheck::Integer => RuleResult::check(value.fract() == 0.0, || {
            format!("{field} must be an integer")
        }),
    }
}

fn is_multiple_of(value: f64, step: f64) -> bool {
    let quotient = value / step;
    (quotient - quotient.round()).abs() < STEP_EPSILON
}

/// Parse an RFC 3339 timestamp carrying the `Z` designator
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if !value.ends_with('Z') || value.as_bytes().get(10) != Some(&b'T') {
        return None;
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

/// Validate a timestamp against the validation clock
#[must_use]
pub fn validate_temporal(
    field: &str,
    value: DateTime<Utc>,
    bound: Temporal,
    now: DateTime<Utc>,
) -> RuleResult {
    match bound {
        Temporal::Future => RuleResult::check(value > now, || {
            format!("{field} must be in the future")
        }),
        Temporal::NotFuture => RuleResult::check(value <= now, || {
            format!("{field} must not be in the future")
        }),
    }
}

/// Validate membership in an enumeration
#[must_use]
pub fn validate_enum(field: &str, value: &str, set: &EnumSet) -> RuleResult {
    RuleResult::check(set.contains(value), || {
        format!("{field} must be one of: {}", set.tokens().join(", "))
    })
}

/// Validate a key of a record with constrained keys
#[must_use]
pub fn validate_record_key(field: &str, key: &str, keys: &EnumSet) -> RuleResult {
    RuleResult::check(keys.contains(key), || {
        format!("{field} has invalid key '{key}'")
    })
}

/// Validate an exact token
#[must_use]
pub fn validate_literal(field: &str, value: &str, token: &str) -> RuleResult {
    RuleResult::check(value == token, || format!("{field} must be '{token}'"))
}

/// Validate an array's element count
#[must_use]
pub fn validate_item_count(field: &str, len: usize, check: ArrayCheck) -> RuleResult {
    match check {
        ArrayCheck::MinItems(min) => RuleResult::check(len >= min, || {
            format!("{field} must contain at least {min} item(s)")
        }),
        ArrayCheck::MaxItems(max) => RuleResult::check(len <= max, || {
            format!("{field} must contain at most {max} item(s)")
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hire_schema::rules::{datetime, number, string};
    use hire_schema::Pattern;
    use serde_json::json;

    #[test]
    fn test_kind_mismatch_message() {
        let rule = FieldRule::from(string());
        let result = validate_kind(&rule, &json!(42));
        assert!(!result.is_valid);
        assert_eq!(result.message.as_deref(), Some("Expected string, received number"));

        assert!(validate_kind(&FieldRule::from(datetime()), &json!("x")).is_valid);
        assert!(!validate_kind(&FieldRule::from(number()), &json!(null)).is_valid);
        assert!(validate_kind(&FieldRule::Any, &json!(null)).is_valid);
    }

    #[test]
    fn test_length_counts_characters() {
        let check = StringCheck::MaxLength(3);
        assert!(validate_string("code", "äöü", &check).is_valid);
        assert!(!validate_string("code", "äöüß", &check).is_valid);

        let result = validate_string("title", "Hey", &StringCheck::MinLength(5));
        assert_eq!(
            result.message.as_deref(),
            Some("title must be at least 5 characters")
        );
    }

    #[test]
    fn test_pattern() {
        let check = StringCheck::Pattern(Pattern::new(r"^\d+$").unwrap());
        assert!(validate_string("page", "12", &check).is_valid);
        assert!(!validate_string("page", "1a", &check).is_valid);
    }

    #[test]
    fn test_email_format() {
        for ok in ["a@b.co", "first.last@example.com", "user+tag@mail.example.org"] {
            assert!(validate_format("email", ok, StringFormat::Email).is_valid, "{ok}");
        }
        for bad in ["", "plain", "@example.com", "a@b", "a@@b.com", "a b@c.com", "a@.com", "a@b..com"] {
            assert!(!validate_format("email", bad, StringFormat::Email).is_valid, "{bad}");
        }
    }

    #[test]
    fn test_url_and_uuid_formats() {
        assert!(validate_format("link", "https://meet.example.com/abc", StringFormat::Url).is_valid);
        assert!(!validate_format("link", "not a url", StringFormat::Url).is_valid);

        let id = "123e4567-e89b-12d3-a456-426614174000";
        assert!(validate_format("id", id, StringFormat::Uuid).is_valid);
        assert!(!validate_format("id", &id.replace('-', ""), StringFormat::Uuid).is_valid);
        assert!(!validate_format("id", "123", StringFormat::Uuid).is_valid);
    }

    #[test]
    fn test_number_bounds() {
        assert!(validate_number("weight", 1.0, NumberCheck::Min(1.0)).is_valid);
        assert!(!validate_number("weight", 0.0, NumberCheck::Min(1.0)).is_valid);
        assert!(!validate_number("weight", 6.0, NumberCheck::Max(5.0)).is_valid);
        assert!(!validate_number("amount", 0.0, NumberCheck::GreaterThan(0.0)).is_valid);
        assert!(validate_number("weight", 3.0, NumberCheck::Integer).is_valid);
        assert!(!validate_number("weight", 3.5, NumberCheck::Integer).is_valid);

        let result = validate_number("score", 6.0, NumberCheck::Max(5.0));
        assert_eq!(result.message.as_deref(), Some("score must be at most 5"));
    }

    #[test]
    fn test_multiple_of_tolerates_float_error() {
        assert!(validate_number("score", 4.5, NumberCheck::MultipleOf(0.5)).is_valid);
        assert!(validate_number("amount", 0.3, NumberCheck::MultipleOf(0.1)).is_valid);
        assert!(!validate_number("score", 4.3, NumberCheck::MultipleOf(0.5)).is_valid);
    }

    #[test]
    fn test_parse_timestamp_requires_utc_designator() {
        assert!(parse_timestamp("2030-01-01T10:00:00Z").is_some());
        assert!(parse_timestamp("2030-01-01T10:00:00.123Z").is_some());
        assert!(parse_timestamp("2030-01-01T10:00:00+02:00").is_none());
        assert!(parse_timestamp("2030-01-01 10:00:00Z").is_none());
        assert!(parse_timestamp("2030-01-01").is_none());
        assert!(parse_timestamp("tomorrow").is_none());
    }

    #[test]
    fn test_temporal_bounds() {
        let now = parse_timestamp("2026-01-01T00:00:00Z").unwrap();
        let later = parse_timestamp("2026-01-01T00:00:01Z").unwrap();

        assert!(validate_temporal("startTime", later, Temporal::Future, now).is_valid);
        assert!(!validate_temporal("startTime", now, Temporal::Future, now).is_valid);
        assert!(validate_temporal("interviewDate", now, Temporal::NotFuture, now).is_valid);
        assert!(!validate_temporal("interviewDate", later, Temporal::NotFuture, now).is_valid);
    }

    #[test]
    fn test_enum_and_literal() {
        let set = EnumSet::new("WorkType", ["REMOTE", "HYBRID", "ON_SITE"]);
        assert!(validate_enum("workType", "REMOTE", &set).is_valid);
        let result = validate_enum("workType", "remote", &set);
        assert_eq!(
            result.message.as_deref(),
            Some("workType must be one of: REMOTE, HYBRID, ON_SITE")
        );

        assert!(validate_literal("type", "ATS", "ATS").is_valid);
        assert!(!validate_literal("type", "CALENDAR", "ATS").is_valid);
    }

    #[test]
    fn test_item_count() {
        assert!(validate_item_count("attendees", 1, ArrayCheck::MinItems(1)).is_valid);
        assert!(!validate_item_count("attendees", 0, ArrayCheck::MinItems(1)).is_valid);
        assert!(!validate_item_count("attachments", 11, ArrayCheck::MaxItems(10)).is_valid);
    }
}
