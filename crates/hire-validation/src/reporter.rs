//! Validation reporter
//!
//! Turns violations into the error body the HTTP layer answers with:
//!
//! ```json
//! {
//!   "status": "error",
//!   "message": "Validation failed",
//!   "errors": [{ "path": "body.score", "message": "…" }]
//! }
//! ```

use crate::engine::{Violation, ViolationKind};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// HTTP status sent with a validation report
pub const STATUS_CODE: u16 = 400;

/// One entry of the `errors` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

/// Client-facing error body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub status: String,
    pub message: String,
    pub errors: Vec<ValidationIssue>,
}

/// Reports validation results
#[derive(Debug, Clone, Default)]
pub struct ValidationReporter;

impl ValidationReporter {
    /// Create a new validation reporter
    pub fn new() -> Self {
        Self
    }

    /// Build the error body for a list of violations, keeping their order
    pub fn report(&self, violations: &[Violation]) -> ValidationReport {
        ValidationReport {
            status: "error".to_string(),
            message: "Validation failed".to_string(),
            errors: violations
                .iter()
                .map(|v| ValidationIssue {
                    path: v.path.to_string(),
                    message: v.message.clone(),
                })
                .collect(),
        }
    }

    /// Serialize the error body as pretty JSON
    ///
    /// # Errors
    ///
    /// Returns an error when serialization fails.
    pub fn to_json(&self, violations: &[Violation]) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(&self.report(violations))?)
    }

    /// One line per violation, for terminals and logs
    pub fn to_text(&self, violations: &[Violation]) -> String {
        let mut out = String::new();
        for v in violations {
            let _ = writeln!(out, "[{}] {}", kind_label(v.kind), v);
        }
        out
    }
}

fn kind_label(kind: ViolationKind) -> &'static str {
    match kind {
        ViolationKind::MissingField => "missing",
        ViolationKind::TypeMismatch => "type",
        ViolationKind::ConstraintViolation => "constraint",
        ViolationKind::CrossFieldViolation => "rule",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hire_payload::{FieldPath, Section};
    use serde_json::json;

    fn violations() -> Vec<Violation> {
        vec![
            Violation {
                path: FieldPath::field(Section::Body, "name"),
                message: "name is required".to_string(),
                kind: ViolationKind::MissingField,
            },
            Violation {
                path: FieldPath::field(Section::Params, "id"),
                message: "id must be a valid UUID".to_string(),
                kind: ViolationKind::ConstraintViolation,
            },
        ]
    }

    #[test]
    fn test_report_shape() {
        let report = ValidationReporter::new().report(&violations());
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "status": "error",
                "message": "Validation failed",
                "errors": [
                    {"path": "body.name", "message": "name is required"},
                    {"path": "params.id", "message": "id must be a valid UUID"}
                ]
            })
        );
    }

    #[test]
    fn test_to_json_round_trips() {
        let reporter = ValidationReporter::new();
        let json = reporter.to_json(&violations()).unwrap();
        let parsed: ValidationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, reporter.report(&violations()));
    }

    #[test]
    fn test_text_lines() {
        let text = ValidationReporter::new().to_text(&violations());
        assert_eq!(
            text,
            "[missing] body.name: name is required\n[constraint] params.id: id must be a valid UUID\n"
        );
    }
}
