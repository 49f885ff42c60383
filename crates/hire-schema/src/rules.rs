//! Shorthand constructors for writing schema definitions
//!
//! ```rust
//! use hire_schema::rules::{array, number, object, string};
//!
//! let criterion = object()
//!     .required("name", string().min_length(3).max_length(50))
//!     .required("weight", number().min(1.0).max(5.0));
//! let criteria = array(criterion).min_items(1).max_items(10);
//! assert_eq!(criteria.checks.len(), 2);
//! ```

use crate::enums::EnumSet;
use crate::model::{
    ArrayRule, DateTimeRule, EnumRule, FieldRule, NumberRule, ObjectRule, RecordRule, StringRule,
};
use std::sync::Arc;

pub fn string() -> StringRule {
    StringRule::new()
}

pub fn number() -> NumberRule {
    NumberRule::new()
}

pub fn boolean() -> FieldRule {
    FieldRule::Boolean
}

pub fn datetime() -> DateTimeRule {
    DateTimeRule::new()
}

pub fn object() -> ObjectRule {
    ObjectRule::new()
}

pub fn array(element: impl Into<FieldRule>) -> ArrayRule {
    ArrayRule::of(element)
}

pub fn record(value: impl Into<FieldRule>) -> RecordRule {
    RecordRule::of(value)
}

pub fn literal(token: impl Into<String>) -> FieldRule {
    FieldRule::Literal(token.into())
}

pub fn any() -> FieldRule {
    FieldRule::Any
}

/// Membership in a catalog enumeration
pub fn enumeration(set: Arc<EnumSet>) -> EnumRule {
    EnumRule::new(set)
}

/// Membership in a set declared inline with the field
pub fn one_of<I, S>(tokens: I) -> EnumRule
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    EnumRule::new(Arc::new(EnumSet::inline(tokens)))
}
