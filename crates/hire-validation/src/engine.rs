//! Validation engine

use crate::coerce;
use crate::rules::{self, RuleResult};
use chrono::{DateTime, Utc};
use hire_payload::{FieldPath, RequestPayload};
use hire_schema::{DateTimeRule, FieldRule, ObjectRule, Presence, RuleContext, Schema, StringRule};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, trace};

/// How undeclared object keys are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrictnessLevel {
    /// Report every undeclared key
    Strict,
    /// Drop undeclared keys from the normalised payload
    #[default]
    Moderate,
    /// Pass undeclared keys through untouched
    Lenient,
}

/// Validation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Strictness level
    pub strictness: StrictnessLevel,
    /// Report every failing constraint of a field, not just the first
    pub collect_all: bool,
    /// Maximum violations reported (0 = unlimited)
    pub max_violations: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            strictness: StrictnessLevel::Moderate,
            collect_all: true,
            max_violations: 0,
        }
    }
}

/// Category of a violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Required field absent
    MissingField,
    /// Present value of the wrong kind
    TypeMismatch,
    /// Value of the right kind outside its declared bounds
    ConstraintViolation,
    /// Structurally valid payload failing a business rule
    CrossFieldViolation,
}

/// One reported problem with a payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Section-qualified path, e.g. `body.attendees.0.userId`
    pub path: FieldPath,
    pub message: String,
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Outcome of validating one payload
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    /// The normalised payload: coerced, defaulted and stripped per strictness
    Accepted(RequestPayload),
    /// Violations in the order they were detected
    Rejected(Vec<Violation>),
}

impl ValidationResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationResult::Accepted(_))
    }

    pub fn is_rejected(&self) -> bool {
        !self.is_accepted()
    }

    /// Normalised payload of an accepted result
    pub fn payload(&self) -> Option<&RequestPayload> {
        match self {
            ValidationResult::Accepted(payload) => Some(payload),
            ValidationResult::Rejected(_) => None,
        }
    }

    /// Violations of a rejected result; empty when accepted
    pub fn violations(&self) -> &[Violation] {
        match self {
            ValidationResult::Accepted(_) => &[],
            ValidationResult::Rejected(violations) => violations,
        }
    }

    pub fn into_result(self) -> std::result::Result<RequestPayload, Vec<Violation>> {
        match self {
            ValidationResult::Accepted(payload) => Ok(payload),
            ValidationResult::Rejected(violations) => Err(violations),
        }
    }
}

/// Main validation engine.
///
/// The engine holds configuration only; one instance can validate any
/// number of payloads against any schema, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    config: ValidationConfig,
}

impl ValidationEngine {
    /// Create a new validation engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with specific configuration
    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a payload against the current time
    pub fn validate(&self, schema: &Schema, payload: &RequestPayload) -> ValidationResult {
        self.validate_at(schema, payload, Utc::now())
    }

    /// Validate a payload with an explicit clock for temporal rules.
    ///
    /// Sections run in declaration order. Inside each object the presence,
    /// kind, constraint and coercion passes run in turn; cross-field rules
    /// run last and only when nothing else failed.
    pub fn validate_at(
        &self,
        schema: &Schema,
        payload: &RequestPayload,
        now: DateTime<Utc>,
    ) -> ValidationResult {
        let mut pass = Pass {
            config: &self.config,
            now,
            violations: Vec::new(),
            failures: 0,
        };
        let mut normalised = payload.clone();
        let empty = Map::new();

        for section_rule in schema.sections() {
            let section = section_rule.section;
            let root = FieldPath::root(section);
            let input = match payload.section(section) {
                Value::Object(map) => map,
                Value::Null => &empty,
                other => {
                    pass.report(
                        root,
                        ViolationKind::TypeMismatch,
                        format!("Expected object, received {}", rules::json_type_name(other)),
                    );
                    continue;
                }
            };
            let output = pass.object(&section_rule.rule, input, &root);
            *normalised.section_mut(section) = Value::Object(output);
        }

        if pass.failures == 0 {
            pass.cross_field(schema, &normalised);
        }

        if pass.failures == 0 {
            trace!(schema = schema.name(), "payload accepted");
            ValidationResult::Accepted(normalised)
        } else {
            debug!(
                schema = schema.name(),
                violations = pass.failures,
                "payload rejected"
            );
            ValidationResult::Rejected(pass.violations)
        }
    }
}

/// State of one validation run
struct Pass<'a> {
    config: &'a ValidationConfig,
    now: DateTime<Utc>,
    violations: Vec<Violation>,
    /// Every failure, including those beyond `max_violations`
    failures: usize,
}

impl Pass<'_> {
    fn report(&mut self, path: FieldPath, kind: ViolationKind, message: String) {
        self.failures += 1;
        let cap = self.config.max_violations;
        if cap == 0 || self.violations.len() < cap {
            self.violations.push(Violation {
                path,
                message,
                kind,
            });
        }
    }

    /// Report a failed rule; returns whether it held
    fn record(
        &mut self,
        path: &FieldPath,
        kind: ViolationKind,
        result: RuleResult,
        custom: Option<&String>,
    ) -> bool {
        if result.is_valid {
            return true;
        }
        let message = custom
            .cloned()
            .or(result.message)
            .unwrap_or_else(|| format!("{} is invalid", path.field_name()));
        self.report(path.clone(), kind, message);
        false
    }

    fn object(
        &mut self,
        rule: &ObjectRule,
        input: &Map<String, Value>,
        path: &FieldPath,
    ) -> Map<String, Value> {
        for spec in &rule.fields {
            if spec.presence == Presence::Required && !input.contains_key(&spec.name) {
                self.report(
                    path.join_key(&spec.name),
                    ViolationKind::MissingField,
                    format!("{} is required", spec.name),
                );
            }
        }

        let mut typed = Vec::new();
        for spec in &rule.fields {
            let Some(value) = input.get(&spec.name) else {
                continue;
            };
            let result = rules::validate_kind(&spec.rule, value);
            if self.record(&path.join_key(&spec.name), ViolationKind::TypeMismatch, result, None) {
                typed.push((spec, value));
            }
        }

        let mut passed = Vec::new();
        for (spec, value) in typed {
            let before = self.failures;
            let checked = self.constrain(&spec.rule, value, &path.join_key(&spec.name));
            if self.failures == before {
                passed.push((spec, checked));
            }
        }

        if self.config.strictness == StrictnessLevel::Strict {
            for key in input.keys().filter(|k| rule.field(k).is_none()) {
                self.report(
                    path.join_key(key),
                    ViolationKind::ConstraintViolation,
                    format!("Unrecognized key '{key}'"),
                );
            }
        }

        let mut output = Map::new();
        for (spec, value) in passed {
            output.insert(spec.name.clone(), coerce_value(&spec.rule, value));
        }
        for spec in &rule.fields {
            if let Presence::Default(default) = &spec.presence {
                if !input.contains_key(&spec.name) {
                    output.insert(spec.name.clone(), default.clone());
                }
            }
        }
        if self.config.strictness == StrictnessLevel::Lenient {
            for (key, value) in input.iter().filter(|(k, _)| rule.field(k).is_none()) {
                output.insert(key.clone(), value.clone());
            }
        }
        output
    }

    /// Kind check, constraints and coercion of a value outside an object:
    /// an array element or a record value.
    fn value(&mut self, rule: &FieldRule, value: &Value, path: &FieldPath) -> Option<Value> {
        let result = rules::validate_kind(rule, value);
        if !self.record(path, ViolationKind::TypeMismatch, result, None) {
            return None;
        }
        let before = self.failures;
        let checked = self.constrain(rule, value, path);
        (self.failures == before).then(|| coerce_value(rule, checked))
    }

    /// Constraints of a value whose kind already matched; nested values
    /// come back normalised.
    fn constrain(&mut self, rule: &FieldRule, value: &Value, path: &FieldPath) -> Value {
        let field = path.field_name();
        match (rule, value) {
            (FieldRule::String(string), Value::String(text)) => {
                self.string(string, text, path);
            }
            (FieldRule::Number(number), Value::Number(n)) => {
                let Some(x) = n.as_f64() else {
                    return value.clone();
                };
                for check in &number.checks {
                    let result = rules::validate_number(field, x, check.kind);
                    if !self.record(path, ViolationKind::ConstraintViolation, result, check.message.as_ref())
                        && !self.config.collect_all
                    {
                        break;
                    }
                }
            }
            (FieldRule::DateTime(datetime), Value::String(text)) => {
                self.datetime(datetime, text, path);
            }
            (FieldRule::Enum(e), Value::String(text)) => {
                let result = rules::validate_enum(field, text, &e.set);
                self.record(path, ViolationKind::ConstraintViolation, result, e.message.as_ref());
            }
            (FieldRule::Literal(token), Value::String(text)) => {
                let result = rules::validate_literal(field, text, token);
                self.record(path, ViolationKind::ConstraintViolation, result, None);
            }
            (FieldRule::Array(array), Value::Array(items)) => {
                for check in &array.checks {
                    let result = rules::validate_item_count(field, items.len(), check.kind);
                    if !self.record(path, ViolationKind::ConstraintViolation, result, check.message.as_ref())
                        && !self.config.collect_all
                    {
                        break;
                    }
                }
                let mut output = Vec::with_capacity(items.len());
                for (idx, item) in items.iter().enumerate() {
                    if let Some(checked) = self.value(&array.element, item, &path.join_index(idx)) {
                        output.push(checked);
                    }
                }
                return Value::Array(output);
            }
            (FieldRule::Object(object), Value::Object(map)) => {
                return Value::Object(self.object(object, map, path));
            }
            (FieldRule::Record(record), Value::Object(map)) => {
                let mut output = Map::new();
                for (key, item) in map {
                    if let Some(keys) = &record.keys {
                        let result = rules::validate_record_key(field, key, keys);
                        if !self.record(&path.join_key(key), ViolationKind::ConstraintViolation, result, None) {
                            continue;
                        }
                    }
                    if let Some(checked) = self.value(&record.value, item, &path.join_key(key)) {
                        output.insert(key.clone(), checked);
                    }
                }
                return Value::Object(output);
            }
            _ => {}
        }
        value.clone()
    }

    fn string(&mut self, rule: &StringRule, text: &str, path: &FieldPath) {
        let field = path.field_name();
        let before = self.failures;
        for check in &rule.checks {
            let result = rules::validate_string(field, text, &check.kind);
            if !self.record(path, ViolationKind::ConstraintViolation, result, check.message.as_ref())
                && !self.config.collect_all
            {
                return;
            }
        }
        if let Some(transform) = rule.transform {
            if self.failures == before && !coerce::can_apply(transform, text) {
                self.report(
                    path.clone(),
                    ViolationKind::ConstraintViolation,
                    format!("{field} must be a numeric string"),
                );
            }
        }
    }

    fn datetime(&mut self, rule: &DateTimeRule, text: &str, path: &FieldPath) {
        let field = path.field_name();
        let Some(timestamp) = rules::parse_timestamp(text) else {
            let message = rule
                .format_message
                .clone()
                .unwrap_or_else(|| format!("{field} must be a valid date-time"));
            self.report(path.clone(), ViolationKind::ConstraintViolation, message);
            return;
        };
        if let Some(check) = &rule.temporal {
            let result = rules::validate_temporal(field, timestamp, check.kind, self.now);
            self.record(path, ViolationKind::ConstraintViolation, result, check.message.as_ref());
        }
    }

    fn cross_field(&mut self, schema: &Schema, payload: &RequestPayload) {
        let ctx = RuleContext::at(self.now);
        for rule in schema.refinements() {
            let absent = rule
                .involves()
                .iter()
                .find(|p| payload.get(p).is_none_or(Value::is_null));
            if let Some(path) = absent {
                trace!(rule = rule.name(), path = %path, "cross-field rule skipped");
                continue;
            }
            if let Err(message) = rule.evaluate(payload, &ctx) {
                self.report(
                    rule.target().clone(),
                    ViolationKind::CrossFieldViolation,
                    message,
                );
            }
        }
    }
}

/// Apply a string rule's transform to a checked value
fn coerce_value(rule: &FieldRule, value: Value) -> Value {
    match (rule, &value) {
        (
            FieldRule::String(StringRule {
                transform: Some(transform),
                ..
            }),
            Value::String(raw),
        ) => coerce::apply(*transform, raw),
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hire_payload::Section;
    use hire_schema::rules::{any, array, boolean, datetime, number, object, one_of, record, string};
    use hire_schema::Transform;
    use serde_json::json;

    fn at(ts: &str) -> DateTime<Utc> {
        rules::parse_timestamp(ts).unwrap()
    }

    fn profile_schema() -> Schema {
        Schema::builder("profile")
            .body(
                object()
                    .required("name", string().min_length(2).max_length(5))
                    .optional("age", number().integer().min(0.0))
                    .with_default("active", boolean(), json!(true)),
            )
            .build()
            .unwrap()
    }

    fn paths(result: &ValidationResult) -> Vec<String> {
        result.violations().iter().map(|v| v.path.to_string()).collect()
    }

    #[test]
    fn test_accepts_and_applies_defaults() {
        let engine = ValidationEngine::new();
        let payload = RequestPayload::new().with_body(json!({"name": "Ada"}));

        let result = engine.validate(&profile_schema(), &payload);
        let accepted = result.payload().unwrap();
        assert_eq!(accepted.body, json!({"name": "Ada", "active": true}));
    }

    #[test]
    fn test_missing_field_does_not_descend() {
        let engine = ValidationEngine::new();
        let result = engine.validate(&profile_schema(), &RequestPayload::new());

        assert_eq!(result.violations().len(), 1);
        let violation = &result.violations()[0];
        assert_eq!(violation.kind, ViolationKind::MissingField);
        assert_eq!(violation.message, "name is required");
        assert_eq!(violation.path.to_string(), "body.name");
    }

    #[test]
    fn test_null_is_a_type_mismatch() {
        let engine = ValidationEngine::new();
        let payload = RequestPayload::new().with_body(json!({"name": null}));

        let result = engine.validate(&profile_schema(), &payload);
        assert_eq!(result.violations()[0].kind, ViolationKind::TypeMismatch);
        assert_eq!(result.violations()[0].message, "Expected string, received null");
    }

    #[test]
    fn test_type_mismatch_short_circuits_constraints() {
        let engine = ValidationEngine::new();
        let payload = RequestPayload::new().with_body(json!({"name": 12345678}));

        let result = engine.validate(&profile_schema(), &payload);
        assert_eq!(result.violations().len(), 1);
    }

    #[test]
    fn test_collect_all_reports_every_failing_constraint() {
        let schema = Schema::builder("age")
            .body(object().required("age", number().integer().min(0.0)))
            .build()
            .unwrap();
        let payload = RequestPayload::new().with_body(json!({"age": -1.5}));

        let all = ValidationEngine::new().validate(&schema, &payload);
        assert_eq!(all.violations().len(), 2);

        let first = ValidationEngine::with_config(ValidationConfig {
            collect_all: false,
            ..Default::default()
        })
        .validate(&schema, &payload);
        assert_eq!(first.violations().len(), 1);
        assert_eq!(first.violations()[0].message, "age must be an integer");
    }

    #[test]
    fn test_max_violations_caps_the_report() {
        let schema = Schema::builder("many")
            .body(
                object()
                    .required("a", string())
                    .required("b", string())
                    .required("c", string()),
            )
            .build()
            .unwrap();
        let engine = ValidationEngine::with_config(ValidationConfig {
            max_violations: 2,
            ..Default::default()
        });

        let result = engine.validate(&schema, &RequestPayload::new());
        assert!(result.is_rejected());
        assert_eq!(paths(&result), ["body.a", "body.b"]);
    }

    #[test]
    fn test_strictness_levels() {
        let payload = RequestPayload::new().with_body(json!({"name": "Ada", "extra": 1}));
        let schema = profile_schema();

        let moderate = ValidationEngine::new().validate(&schema, &payload);
        assert!(moderate.payload().unwrap().body.get("extra").is_none());

        let lenient = ValidationEngine::with_config(ValidationConfig {
            strictness: StrictnessLevel::Lenient,
            ..Default::default()
        })
        .validate(&schema, &payload);
        assert_eq!(lenient.payload().unwrap().body["extra"], json!(1));

        let strict = ValidationEngine::with_config(ValidationConfig {
            strictness: StrictnessLevel::Strict,
            ..Default::default()
        })
        .validate(&schema, &payload);
        assert_eq!(strict.violations()[0].message, "Unrecognized key 'extra'");
        assert_eq!(strict.violations()[0].path.to_string(), "body.extra");
    }

    #[test]
    fn test_nested_paths_and_array_elements() {
        let schema = Schema::builder("meeting")
            .body(object().required(
                "attendees",
                array(
                    object()
                        .required("userId", string().min_length(1))
                        .with_default("role", one_of(["HOST", "ATTENDEE"]), json!("ATTENDEE")),
                )
                .min_items(1),
            ))
            .build()
            .unwrap();
        let engine = ValidationEngine::new();

        let bad = RequestPayload::new()
            .with_body(json!({"attendees": [{"userId": "u1"}, {"userId": ""}, 7]}));
        let result = engine.validate(&schema, &bad);
        assert_eq!(paths(&result), ["body.attendees.1.userId", "body.attendees.2"]);

        let good = RequestPayload::new().with_body(json!({"attendees": [{"userId": "u1"}]}));
        let result = engine.validate(&schema, &good);
        assert_eq!(
            result.payload().unwrap().body["attendees"][0]["role"],
            json!("ATTENDEE")
        );
    }

    #[test]
    fn test_record_keys_and_values() {
        let schema = Schema::builder("prefs")
            .body(object().required(
                "channels",
                record(boolean()).keys(std::sync::Arc::new(hire_schema::EnumSet::new(
                    "NotificationChannel",
                    ["EMAIL", "SMS"],
                ))),
            ))
            .build()
            .unwrap();
        let payload =
            RequestPayload::new().with_body(json!({"channels": {"EMAIL": true, "FAX": true, "SMS": "no"}}));

        let result = ValidationEngine::new().validate(&schema, &payload);
        assert_eq!(paths(&result), ["body.channels.FAX", "body.channels.SMS"]);
    }

    #[test]
    fn test_any_accepts_everything() {
        let schema = Schema::builder("opaque")
            .body(object().optional("context", record(any())))
            .build()
            .unwrap();
        let payload = RequestPayload::new().with_body(json!({"context": {"a": null, "b": [1, 2]}}));
        assert!(ValidationEngine::new().validate(&schema, &payload).is_accepted());
    }

    #[test]
    fn test_query_coercion() {
        let page = string().pattern(hire_schema::Pattern::new(r"^\d+$").unwrap());
        let schema = Schema::builder("list")
            .query(
                object()
                    .optional("page", page.transform(Transform::ToNumber))
                    .optional("read", string().transform(Transform::ToBool)),
            )
            .build()
            .unwrap();
        let payload = RequestPayload::new().with_query_pairs([("page", "3"), ("read", "true")]);

        let result = ValidationEngine::new().validate(&schema, &payload);
        let query = &result.payload().unwrap().query;
        assert_eq!(query["page"], json!(3));
        assert_eq!(query["read"], json!(true));

        let bad = RequestPayload::new().with_query_pairs([("page", "three")]);
        let result = ValidationEngine::new().validate(&schema, &bad);
        assert_eq!(paths(&result), ["query.page"]);
    }

    #[test]
    fn test_transform_without_pattern_rejects_non_numeric() {
        let schema = Schema::builder("list")
            .query(object().optional("limit", string().transform(Transform::ToNumber)))
            .build()
            .unwrap();
        let payload = RequestPayload::new().with_query_pairs([("limit", "ten")]);

        let result = ValidationEngine::new().validate(&schema, &payload);
        assert_eq!(result.violations()[0].message, "limit must be a numeric string");
    }

    #[test]
    fn test_section_shapes() {
        let schema = profile_schema();
        let engine = ValidationEngine::new();

        let payload = RequestPayload::new().with_body(json!(["not", "an", "object"]));
        let result = engine.validate(&schema, &payload);
        assert_eq!(paths(&result), ["body"]);
        assert_eq!(result.violations()[0].kind, ViolationKind::TypeMismatch);

        let payload = RequestPayload::new().with_body(Value::Null);
        let result = engine.validate(&schema, &payload);
        assert_eq!(paths(&result), ["body.name"]);
    }

    #[test]
    fn test_temporal_rules_use_given_clock() {
        let schema = Schema::builder("slot")
            .body(object().required(
                "startTime",
                datetime().future().message("Start time must be in the future"),
            ))
            .build()
            .unwrap();
        let payload = RequestPayload::new().with_body(json!({"startTime": "2030-01-01T10:00:00Z"}));
        let engine = ValidationEngine::new();

        assert!(engine.validate_at(&schema, &payload, at("2029-12-31T00:00:00Z")).is_accepted());
        let late = engine.validate_at(&schema, &payload, at("2030-06-01T00:00:00Z"));
        assert_eq!(late.violations()[0].message, "Start time must be in the future");

        let garbled = RequestPayload::new().with_body(json!({"startTime": "next week"}));
        let result = engine.validate_at(&schema, &garbled, at("2029-12-31T00:00:00Z"));
        assert_eq!(result.violations()[0].message, "startTime must be a valid date-time");
    }

    #[test]
    fn test_undeclared_sections_pass_through() {
        let payload = RequestPayload::new()
            .with_body(json!({"name": "Ada"}))
            .with_params(json!({"id": "42"}));
        let result = ValidationEngine::new().validate(&profile_schema(), &payload);
        assert_eq!(result.payload().unwrap().params, json!({"id": "42"}));
    }

    #[test]
    fn test_default_config() {
        let config = ValidationConfig::default();
        assert_eq!(config.strictness, StrictnessLevel::Moderate);
        assert!(config.collect_all);
        assert_eq!(config.max_violations, 0);
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: ValidationConfig = serde_json::from_str(r#"{"strictness": "strict"}"#).unwrap();
        assert_eq!(config.strictness, StrictnessLevel::Strict);
        assert!(config.collect_all);
    }

    #[test]
    fn test_result_helpers() {
        let accepted = ValidationResult::Accepted(RequestPayload::new());
        assert!(accepted.is_accepted());
        assert!(accepted.violations().is_empty());

        let violation = Violation {
            path: FieldPath::field(Section::Body, "score"),
            message: "bad".to_string(),
            kind: ViolationKind::CrossFieldViolation,
        };
        assert_eq!(violation.to_string(), "body.score: bad");
        let rejected = ValidationResult::Rejected(vec![violation]);
        assert!(rejected.payload().is_none());
        assert_eq!(rejected.into_result().unwrap_err().len(), 1);
    }
}
