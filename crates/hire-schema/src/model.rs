//! Rule tree definitions
#![allow(clippy::return_self_not_must_use)] // Fluent builder methods return Self for ergonomics.

use crate::enums::EnumSet;
use crate::{Error, Result};
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A constraint plus the message reported when it fails.
///
/// `message: None` means the engine words the violation itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Check<K> {
    pub kind: K,
    pub message: Option<String>,
}

impl<K> Check<K> {
    pub fn new(kind: K) -> Self {
        Self {
            kind,
            message: None,
        }
    }
}

/// Set the message on the most recently added check
fn set_last_message<K>(checks: &mut [Check<K>], message: String) -> bool {
    match checks.last_mut() {
        Some(check) => {
            check.message = Some(message);
            true
        }
        None => false,
    }
}

/// Compiled regular expression with its source text
#[derive(Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] when the regex does not compile.
    pub fn new(source: &str) -> Result<Self> {
        Regex::new(source)
            .map(|regex| Self { regex })
            .map_err(|e| Error::InvalidPattern {
                pattern: source.to_string(),
                reason: e.to_string(),
            })
    }

    /// Source text of the pattern
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether the pattern matches anywhere in `value`
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.as_str()).finish()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

/// Well-known string formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFormat {
    Email,
    Url,
    Uuid,
}

/// String constraints
#[derive(Debug, Clone, PartialEq)]
pub enum StringCheck {
    MinLength(usize),
    MaxLength(usize),
    Length(usize),
    Pattern(Pattern),
    Format(StringFormat),
}

/// Conversion applied to a string that passed its checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Decimal digits to a JSON number
    ToNumber,
    /// `"true"` to `true`, anything else to `false`
    ToBool,
}

/// Rule for string fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringRule {
    pub checks: Vec<Check<StringCheck>>,
    pub transform: Option<Transform>,
}

impl StringRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_length(mut self, len: usize) -> Self {
        self.checks.push(Check::new(StringCheck::MinLength(len)));
        self
    }

    pub fn max_length(mut self, len: usize) -> Self {
        self.checks.push(Check::new(StringCheck::MaxLength(len)));
        self
    }

    /// Exact length
    pub fn length(mut self, len: usize) -> Self {
        self.checks.push(Check::new(StringCheck::Length(len)));
        self
    }

    pub fn pattern(mut self, pattern: Pattern) -> Self {
        self.checks.push(Check::new(StringCheck::Pattern(pattern)));
        self
    }

    pub fn email(mut self) -> Self {
        self.checks.push(Check::new(StringCheck::Format(StringFormat::Email)));
        self
    }

    pub fn url(mut self) -> Self {
        self.checks.push(Check::new(StringCheck::Format(StringFormat::Url)));
        self
    }

    pub fn uuid(mut self) -> Self {
        self.checks.push(Check::new(StringCheck::Format(StringFormat::Uuid)));
        self
    }

    /// Set the message of the last added check
    pub fn message(mut self, message: impl Into<String>) -> Self {
        set_last_message(&mut self.checks, message.into());
        self
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }
}

/// Numeric constraints
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberCheck {
    Min(f64),
    Max(f64),
    /// Strictly greater than
    GreaterThan(f64),
    MultipleOf(f64),
    Integer,
}

/// Rule for number fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberRule {
    pub checks: Vec<Check<NumberCheck>>,
}

impl NumberRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, value: f64) -> Self {
        self.checks.push(Check::new(NumberCheck::Min(value)));
        self
    }

    pub fn max(mut self, value: f64) -> Self {
        self.checks.push(Check::new(NumberCheck::Max(value)));
        self
    }

    pub fn positive(mut self) -> Self {
        self.checks.push(Check::new(NumberCheck::GreaterThan(0.0)));
        self
    }

    pub fn multiple_of(mut self, step: f64) -> Self {
        self.checks.push(Check::new(NumberCheck::MultipleOf(step)));
        self
    }

    pub fn integer(mut self) -> Self {
        self.checks.push(Check::new(NumberCheck::Integer));
        self
    }

    /// Set the message of the last added check
    pub fn message(mut self, message: impl Into<String>) -> Self {
        set_last_message(&mut self.checks, message.into());
        self
    }
}

/// Position of a timestamp relative to the validation clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Temporal {
    /// Strictly after now
    Future,
    /// At or before now
    NotFuture,
}

/// Rule for RFC 3339 UTC timestamps carried as strings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateTimeRule {
    /// Reported when the string is not a timestamp
    pub format_message: Option<String>,
    pub temporal: Option<Check<Temporal>>,
}

impl DateTimeRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format_message(mut self, message: impl Into<String>) -> Self {
        self.format_message = Some(message.into());
        self
    }

    pub fn future(mut self) -> Self {
        self.temporal = Some(Check::new(Temporal::Future));
        self
    }

    pub fn not_future(mut self) -> Self {
        self.temporal = Some(Check::new(Temporal::NotFuture));
        self
    }

    /// Set the message of the temporal bound
    pub fn message(mut self, message: impl Into<String>) -> Self {
        if let Some(temporal) = self.temporal.as_mut() {
            temporal.message = Some(message.into());
        }
        self
    }
}

/// Membership in a fixed token set
#[derive(Debug, Clone, PartialEq)]
pub struct EnumRule {
    pub set: Arc<EnumSet>,
    pub message: Option<String>,
}

impl EnumRule {
    pub fn new(set: Arc<EnumSet>) -> Self {
        Self { set, message: None }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Element-count constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayCheck {
    MinItems(usize),
    MaxItems(usize),
}

/// Rule for arrays; every element is checked against `element`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayRule {
    pub element: Box<FieldRule>,
    pub checks: Vec<Check<ArrayCheck>>,
}

impl ArrayRule {
    pub fn of(element: impl Into<FieldRule>) -> Self {
        Self {
            element: Box::new(element.into()),
            checks: Vec::new(),
        }
    }

    pub fn min_items(mut self, count: usize) -> Self {
        self.checks.push(Check::new(ArrayCheck::MinItems(count)));
        self
    }

    pub fn max_items(mut self, count: usize) -> Self {
        self.checks.push(Check::new(ArrayCheck::MaxItems(count)));
        self
    }

    /// Set the message of the last added check
    pub fn message(mut self, message: impl Into<String>) -> Self {
        set_last_message(&mut self.checks, message.into());
        self
    }
}

/// Presence requirement of an object field
#[derive(Debug, Clone, PartialEq)]
pub enum Presence {
    Required,
    Optional,
    /// Optional; the value is filled in when the field is absent
    Default(Value),
}

/// One declared field of an object
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub rule: FieldRule,
    pub presence: Presence,
}

/// Rule for objects with a fixed, ordered field set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectRule {
    pub fields: Vec<FieldSpec>,
}

impl ObjectRule {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, name: &str, rule: FieldRule, presence: Presence) -> Self {
        self.fields.push(FieldSpec {
            name: name.to_string(),
            rule,
            presence,
        });
        self
    }

    pub fn required(self, name: &str, rule: impl Into<FieldRule>) -> Self {
        self.push(name, rule.into(), Presence::Required)
    }

    pub fn optional(self, name: &str, rule: impl Into<FieldRule>) -> Self {
        self.push(name, rule.into(), Presence::Optional)
    }

    pub fn with_default(self, name: &str, rule: impl Into<FieldRule>, default: Value) -> Self {
        self.push(name, rule.into(), Presence::Default(default))
    }

    /// Look up a declared field
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Free-form map with optionally constrained keys
#[derive(Debug, Clone, PartialEq)]
pub struct RecordRule {
    pub keys: Option<Arc<EnumSet>>,
    pub value: Box<FieldRule>,
}

impl RecordRule {
    pub fn of(value: impl Into<FieldRule>) -> Self {
        Self {
            keys: None,
            value: Box::new(value.into()),
        }
    }

    pub fn keys(mut self, keys: Arc<EnumSet>) -> Self {
        self.keys = Some(keys);
        self
    }
}

/// One node of a schema
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRule {
    String(StringRule),
    Number(NumberRule),
    Boolean,
    DateTime(DateTimeRule),
    Enum(EnumRule),
    Array(ArrayRule),
    Object(ObjectRule),
    Literal(String),
    Record(RecordRule),
    Any,
}

impl FieldRule {
    /// Kind name used in type-mismatch messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldRule::String(_) | FieldRule::Enum(_) | FieldRule::Literal(_) => "string",
            FieldRule::Number(_) => "number",
            FieldRule::Boolean => "boolean",
            FieldRule::DateTime(_) => "date-time string",
            FieldRule::Array(_) => "array",
            FieldRule::Object(_) | FieldRule::Record(_) => "object",
            FieldRule::Any => "any",
        }
    }
}

impl From<StringRule> for FieldRule {
    fn from(rule: StringRule) -> Self {
        FieldRule::String(rule)
    }
}

impl From<NumberRule> for FieldRule {
    fn from(rule: NumberRule) -> Self {
        FieldRule::Number(rule)
    }
}

impl From<DateTimeRule> for FieldRule {
    fn from(rule: DateTimeRule) -> Self {
        FieldRule::DateTime(rule)
    }
}

impl From<EnumRule> for FieldRule {
    fn from(rule: EnumRule) -> Self {
        FieldRule::Enum(rule)
    }
}

impl From<ArrayRule> for FieldRule {
    fn from(rule: ArrayRule) -> Self {
        FieldRule::Array(rule)
    }
}

impl From<ObjectRule> for FieldRule {
    fn from(rule: ObjectRule) -> Self {
        FieldRule::Object(rule)
    }
}

impl From<RecordRule> for FieldRule {
    fn from(rule: RecordRule) -> Self {
        FieldRule::Record(rule)
    }
}
