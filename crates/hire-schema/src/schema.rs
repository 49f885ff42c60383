//! Schemas and their construction-time checks

use crate::model::{
    ArrayCheck, FieldRule, NumberCheck, ObjectRule, Presence, StringCheck,
};
use crate::refine::CrossFieldRule;
use crate::{Error, Result};
use hire_payload::{FieldPath, PathSegment, Section};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Object rule applied to one request section
#[derive(Debug, Clone)]
pub struct SectionRule {
    pub section: Section,
    pub rule: ObjectRule,
}

/// Immutable description of a request: its section rules plus the
/// cross-field rules evaluated after them, in declaration order.
#[derive(Debug, Clone)]
pub struct Schema {
    pub(crate) name: String,
    pub(crate) sections: Vec<SectionRule>,
    pub(crate) refinements: Vec<Arc<dyn CrossFieldRule>>,
}

impl Schema {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            sections: Vec::new(),
            refinements: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sections(&self) -> &[SectionRule] {
        &self.sections
    }

    /// Rule for one section, if the schema declares it
    pub fn section(&self, section: Section) -> Option<&ObjectRule> {
        self.sections
            .iter()
            .find(|s| s.section == section)
            .map(|s| &s.rule)
    }

    pub fn refinements(&self) -> &[Arc<dyn CrossFieldRule>] {
        &self.refinements
    }

    /// Whether `path` addresses something the schema declares.
    ///
    /// Record and `Any` rules accept any deeper path.
    pub fn declares(&self, path: &FieldPath) -> bool {
        let Some(root) = self.section(path.section()) else {
            return false;
        };
        let mut current = RuleRef::Object(root);
        for seg in path.segments() {
            current = match (current, seg) {
                (RuleRef::Object(obj), PathSegment::Key(key)) => match obj.field(key) {
                    Some(spec) => RuleRef::Field(&spec.rule),
                    None => return false,
                },
                (RuleRef::Field(FieldRule::Object(obj)), PathSegment::Key(key)) => {
                    match obj.field(key) {
                        Some(spec) => RuleRef::Field(&spec.rule),
                        None => return false,
                    }
                }
                (RuleRef::Field(FieldRule::Array(arr)), PathSegment::Index(_)) => {
                    RuleRef::Field(&arr.element)
                }
                (RuleRef::Field(FieldRule::Record(rec)), PathSegment::Key(_)) => {
                    RuleRef::Field(&rec.value)
                }
                (RuleRef::Field(FieldRule::Any), _) => return true,
                _ => return false,
            };
        }
        true
    }
}

#[derive(Clone, Copy)]
enum RuleRef<'a> {
    Object(&'a ObjectRule),
    Field(&'a FieldRule),
}

/// Collects sections and refinements; [`SchemaBuilder::build`] checks them
pub struct SchemaBuilder {
    name: String,
    sections: Vec<SectionRule>,
    refinements: Vec<Arc<dyn CrossFieldRule>>,
}

impl SchemaBuilder {
    #[must_use]
    pub fn section(mut self, section: Section, rule: ObjectRule) -> Self {
        self.sections.push(SectionRule { section, rule });
        self
    }

    #[must_use]
    pub fn body(self, rule: ObjectRule) -> Self {
        self.section(Section::Body, rule)
    }

    #[must_use]
    pub fn params(self, rule: ObjectRule) -> Self {
        self.section(Section::Params, rule)
    }

    #[must_use]
    pub fn query(self, rule: ObjectRule) -> Self {
        self.section(Section::Query, rule)
    }

    #[must_use]
    pub fn refine(mut self, rule: impl CrossFieldRule + 'static) -> Self {
        self.refinements.push(Arc::new(rule));
        self
    }

    /// Check the definition and freeze it.
    ///
    /// # Errors
    ///
    /// Returns the first definition problem found: a repeated section or
    /// field, inverted bounds, an empty enumeration or literal, a default
    /// that does not fit its rule, or a refinement path the schema does not
    /// declare.
    pub fn build(self) -> Result<Schema> {
        let mut seen = HashSet::new();
        for section in &self.sections {
            if !seen.insert(section.section) {
                return Err(Error::DuplicateSection {
                    schema: self.name.clone(),
                    section: section.section.to_string(),
                });
            }
            let location = format!("{}/{}", self.name, section.section);
            check_object(&section.rule, &location)?;
        }

        let schema = Schema {
            name: self.name,
            sections: self.sections,
            refinements: self.refinements,
        };

        for rule in &schema.refinements {
            let paths = std::iter::once(rule.target()).chain(rule.involves());
            for path in paths {
                if !schema.declares(path) {
                    return Err(Error::UnknownPath {
                        schema: schema.name.clone(),
                        rule: rule.name().to_string(),
                        path: path.to_string(),
                    });
                }
            }
        }

        debug!(
            schema = %schema.name,
            sections = schema.sections.len(),
            refinements = schema.refinements.len(),
            "schema built"
        );
        Ok(schema)
    }
}

fn check_object(rule: &ObjectRule, location: &str) -> Result<()> {
    let mut names = HashSet::new();
    for spec in &rule.fields {
        if !names.insert(spec.name.as_str()) {
            return Err(Error::DuplicateField {
                location: location.to_string(),
                field: spec.name.clone(),
            });
        }
        let field_location = format!("{location}.{}", spec.name);
        check_rule(&spec.rule, &field_location)?;
        if let Presence::Default(value) = &spec.presence {
            check_default(&spec.rule, value, &field_location)?;
        }
    }
    Ok(())
}

fn check_rule(rule: &FieldRule, location: &str) -> Result<()> {
    match rule {
        FieldRule::String(s) => {
            let mut min = None;
            let mut max = None;
            for check in &s.checks {
                match check.kind {
                    StringCheck::MinLength(n) => min = Some(n),
                    StringCheck::MaxLength(n) => max = Some(n),
                    _ => {}
                }
            }
            check_order(min, max, location, "length")
        }
        FieldRule::Number(n) => {
            let mut min = None;
            let mut max = None;
            for check in &n.checks {
                match check.kind {
                    NumberCheck::Min(v) | NumberCheck::GreaterThan(v) => {
                        ensure_finite(v, location)?;
                        min = Some(v);
                    }
                    NumberCheck::Max(v) => {
                        ensure_finite(v, location)?;
                        max = Some(v);
                    }
                    NumberCheck::MultipleOf(step) => {
                        if !(step.is_finite() && step > 0.0) {
                            return Err(Error::InvalidBounds {
                                location: location.to_string(),
                                reason: format!("multiple-of step {step} must be positive"),
                            });
                        }
                    }
                    NumberCheck::Integer => {}
                }
            }
            check_order(min, max, location, "value")
        }
        FieldRule::Enum(e) => {
            if e.set.is_empty() {
                return Err(Error::InvalidEnum {
                    location: location.to_string(),
                    reason: format!("enumeration '{}' has no tokens", e.set.name()),
                });
            }
            Ok(())
        }
        FieldRule::Literal(token) => {
            if token.is_empty() {
                return Err(Error::InvalidEnum {
                    location: location.to_string(),
                    reason: "literal token is empty".to_string(),
                });
            }
            Ok(())
        }
        FieldRule::Array(a) => {
            let mut min = None;
            let mut max = None;
            for check in &a.checks {
                match check.kind {
                    ArrayCheck::MinItems(n) => min = Some(n),
                    ArrayCheck::MaxItems(n) => max = Some(n),
                }
            }
            check_order(min, max, location, "item count")?;
            check_rule(&a.element, &format!("{location}[]"))
        }
        FieldRule::Object(o) => check_object(o, location),
        FieldRule::Record(r) => {
            if let Some(keys) = &r.keys {
                if keys.is_empty() {
                    return Err(Error::InvalidEnum {
                        location: location.to_string(),
                        reason: format!("key enumeration '{}' has no tokens", keys.name()),
                    });
                }
            }
            check_rule(&r.value, &format!("{location}{{}}"))
        }
        FieldRule::Boolean | FieldRule::DateTime(_) | FieldRule::Any => Ok(()),
    }
}

fn ensure_finite(value: f64, location: &str) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidBounds {
            location: location.to_string(),
            reason: format!("bound {value} is not finite"),
        })
    }
}

fn check_order<T: PartialOrd + std::fmt::Display>(
    min: Option<T>,
    max: Option<T>,
    location: &str,
    what: &str,
) -> Result<()> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(Error::InvalidBounds {
            location: location.to_string(),
            reason: format!("minimum {what} {min} exceeds maximum {max}"),
        }),
        _ => Ok(()),
    }
}

/// Shallow kind check of a declared default
fn check_default(rule: &FieldRule, value: &Value, location: &str) -> Result<()> {
    let fits = match rule {
        FieldRule::String(_) | FieldRule::DateTime(_) => value.is_string(),
        FieldRule::Number(_) => value.is_number(),
        FieldRule::Boolean => value.is_boolean(),
        FieldRule::Enum(e) => value.as_str().is_some_and(|t| e.set.contains(t)),
        FieldRule::Literal(token) => value.as_str() == Some(token.as_str()),
        FieldRule::Array(_) => value.is_array(),
        FieldRule::Object(_) | FieldRule::Record(_) => value.is_object(),
        FieldRule::Any => true,
    };
    if fits {
        Ok(())
    } else {
        Err(Error::InvalidDefault {
            location: location.to_string(),
            reason: format!("{value} is not a valid {}", rule.kind_name()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refine::Refinement;
    use crate::rules::{array, boolean, number, object, one_of, record, any, string};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Empty {}

    fn always(_: &Empty, _: &crate::RuleContext) -> bool {
        true
    }

    #[test]
    fn test_build_simple_schema() {
        let schema = Schema::builder("getJob")
            .params(object().required("id", string().min_length(1)))
            .build()
            .unwrap();

        assert_eq!(schema.name(), "getJob");
        assert!(schema.section(Section::Params).is_some());
        assert!(schema.section(Section::Body).is_none());
    }

    #[test]
    fn test_duplicate_section_rejected() {
        let err = Schema::builder("twice")
            .body(object())
            .body(object())
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateSection { .. }));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let err = Schema::builder("dup")
            .body(object().required("title", string()).optional("title", string()))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateField { field, .. } if field == "title"));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let err = Schema::builder("bounds")
            .body(object().required("title", string().min_length(10).max_length(5)))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidBounds { .. }));

        let err = Schema::builder("bounds")
            .body(object().required("tags", array(string()).min_items(3).max_items(1)))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidBounds { .. }));

        let err = Schema::builder("step")
            .body(object().required("score", number().multiple_of(0.0)))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidBounds { .. }));
    }

    #[test]
    fn test_empty_enum_rejected() {
        let tokens: [&str; 0] = [];
        let err = Schema::builder("enum")
            .body(object().required("kind", one_of(tokens)))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidEnum { .. }));
    }

    #[test]
    fn test_default_must_fit_rule() {
        let err = Schema::builder("defaults")
            .body(object().with_default("role", one_of(["HOST", "ATTENDEE"]), json!("GUEST")))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDefault { .. }));

        let ok = Schema::builder("defaults")
            .body(object().with_default("isRequired", boolean(), json!(true)))
            .build();
        assert!(ok.is_ok());
    }

    #[test]
    fn test_refinement_paths_must_be_declared() {
        let rule = Refinement::new(
            "check",
            FieldPath::field(Section::Body, "endTime"),
            "never shown",
            always,
        );
        let err = Schema::builder("refined")
            .body(object().required("startTime", string()))
            .refine(rule)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::UnknownPath { path, .. } if path == "body.endTime"));
    }

    #[test]
    fn test_declares_walks_nested_rules() {
        let schema = Schema::builder("nested")
            .body(
                object()
                    .required(
                        "criteria",
                        array(object().required("score", number())),
                    )
                    .optional("context", record(any())),
            )
            .build()
            .unwrap();

        let declared = |p: &str| schema.declares(&FieldPath::parse(p).unwrap());
        assert!(declared("body"));
        assert!(declared("body.criteria"));
        assert!(declared("body.criteria.0.score"));
        assert!(declared("body.context.anything.deeper"));
        assert!(!declared("body.criteria.score"));
        assert!(!declared("body.missing"));
        assert!(!declared("query.page"));
    }
}
