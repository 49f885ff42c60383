#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # hire-validation
//!
//! Validation engine for request payloads.
//!
//! A payload is checked against a [`hire_schema::Schema`] in ordered passes:
//! presence, kind, constraints, coercion and defaulting, and finally the
//! schema's cross-field rules. The outcome is either the normalised payload
//! or the ordered list of violations; malformed input never surfaces as an
//! `Err`.
//!
//! ## Example Usage
//!
//! ```rust
//! use hire_payload::RequestPayload;
//! use hire_schema::{rules::{object, string}, Schema};
//! use hire_validation::engine::ValidationEngine;
//! use serde_json::json;
//!
//! let schema = Schema::builder("login")
//!     .body(
//!         object()
//!             .required("email", string().email())
//!             .required("password", string().min_length(1)),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let payload = RequestPayload::new().with_body(json!({"email": "ada@example.com"}));
//! let result = ValidationEngine::new().validate(&schema, &payload);
//!
//! assert_eq!(result.violations()[0].message, "password is required");
//! ```

pub mod coerce;
pub mod engine;
pub mod reporter;
pub mod rules;

// Re-export main types
pub use engine::{
    StrictnessLevel, ValidationConfig, ValidationEngine, ValidationResult, Violation,
    ViolationKind,
};
pub use reporter::{ValidationIssue, ValidationReport, ValidationReporter};
pub use rules::RuleResult;

use hire_payload::RequestPayload;
use hire_schema::{Schema, SchemaRegistry};
use thiserror::Error;

/// Errors that can occur around validation.
///
/// Invalid payloads are not errors; they produce a rejected
/// [`ValidationResult`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown schema: {0}")]
    UnknownSchema(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Convenience function to validate a payload with default settings
pub fn validate(schema: &Schema, payload: &RequestPayload) -> ValidationResult {
    ValidationEngine::new().validate(schema, payload)
}

/// Validate a payload against a registered schema by name
///
/// # Errors
///
/// Returns [`Error::UnknownSchema`] when no schema has that name.
pub fn validate_named(
    registry: &SchemaRegistry,
    name: &str,
    payload: &RequestPayload,
) -> Result<ValidationResult> {
    let schema = registry
        .get(name)
        .ok_or_else(|| Error::UnknownSchema(name.to_string()))?;
    Ok(validate(schema, payload))
}
