//! Recruiting assistant configuration and interactions

use crate::common::identifier;
use hire_payload::{FieldPath, Section};
use hire_schema::rules::{any, array, boolean, enumeration, number, object, one_of, record, string};
use hire_schema::{EnumCatalog, Refinement, Result, RuleContext, Schema, StringRule};
use serde::Deserialize;
use serde_json::{Map, Value, json};

pub const BUSINESS_PREFERENCES: &str = "businessPreferences";
pub const COMMUNICATION_PREFERENCES: &str = "communicationPreferences";
pub const AI_SCREENING_CONFIG: &str = "aiScreeningConfig";
pub const CONFIGURE_ASSISTANT: &str = "configureAssistant";
pub const AI_INTERACTION: &str = "aiInteraction";

#[derive(Debug, Deserialize)]
struct Interaction {
    #[serde(rename = "type")]
    kind: String,
    context: Map<String, Value>,
}

/// Whether a context entry carries something usable
fn is_set(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

fn context_fits_interaction(interaction: &Interaction, _: &RuleContext) -> bool {
    let ctx = &interaction.context;
    match interaction.kind.as_str() {
        "screening" => is_set(ctx.get("jobId")) && is_set(ctx.get("questions")),
        "scheduling" => matches!(ctx.get("timeSlots"), Some(Value::Array(_))),
        _ => true,
    }
}

/// ISO language code such as `en` or `pt-BR`
fn language() -> StringRule {
    string().min_length(2).max_length(5)
}

fn statement() -> StringRule {
    string().min_length(10).max_length(2000)
}

pub fn schemas(catalog: &EnumCatalog) -> Result<Vec<Schema>> {
    Ok(vec![
        business_preferences()?,
        communication_preferences(catalog)?,
        ai_screening_config()?,
        configure_assistant(catalog)?,
        ai_interaction()?,
    ])
}

fn business_preferences() -> Result<Schema> {
    Schema::builder(BUSINESS_PREFERENCES)
        .body(
            object()
                .optional("businessOverview", statement())
                .optional("businessCulture", statement())
                .optional("businessValues", statement())
                .optional("businessMission", statement()),
        )
        .build()
}

fn communication_preferences(catalog: &EnumCatalog) -> Result<Schema> {
    Schema::builder(COMMUNICATION_PREFERENCES)
        .body(
            object()
                .required("tone", enumeration(catalog.require("AITone")?))
                .with_default("blockedTeamTopics", array(string()), json!([]))
                .with_default("blockedCandidateTopics", array(string()), json!([]))
                .optional("languagePreference", language()),
        )
        .build()
}

fn ai_screening_config() -> Result<Schema> {
    let question = object()
        .required("question", string().min_length(10).max_length(500))
        .optional("expectedAnswer", string().min_length(10).max_length(1000))
        .optional("weight", number().min(1.0).max(10.0));

    let guidance = object()
        .optional("customQuestions", array(question).max_items(10))
        .optional("skillsToAssess", array(string()).min_items(1).max_items(20))
        .optional("minimumScore", number().min(0.0).max(100.0))
        .optional("feedbackDetail", one_of(["basic", "detailed", "comprehensive"]));

    Schema::builder(AI_SCREENING_CONFIG)
        .body(
            object()
                .required("isEnabled", boolean())
                .optional("guidance", guidance),
        )
        .build()
}

fn configure_assistant(catalog: &EnumCatalog) -> Result<Schema> {
    let screening = object()
        .required("enabled", boolean())
        .optional("customQuestions", array(string()).max_items(10))
        .optional("skillsToAssess", array(string()).max_items(20))
        .optional("minimumScore", number().min(0.0).max(100.0));

    let scheduling = object()
        .required("enabled", boolean())
        // days
        .optional("availabilityWindow", number().positive().max(30.0))
        .optional("reminderEnabled", boolean())
        // hours
        .optional("reminderHours", number().positive().max(72.0));

    Schema::builder(CONFIGURE_ASSISTANT)
        .body(
            object()
                .required("companyId", identifier("Company ID is required"))
                .optional("aiScreeningConfig", screening)
                .optional("aiSchedulingConfig", scheduling)
                .optional("tone", enumeration(catalog.require("AITone")?))
                .optional("language", language()),
        )
        .build()
}

fn ai_interaction() -> Result<Schema> {
    let context = FieldPath::field(Section::Body, "context");

    Schema::builder(AI_INTERACTION)
        .body(
            object()
                .required("type", one_of(["screening", "scheduling", "note-taking"]))
                .required("candidateId", identifier("Candidate ID is required"))
                .required("context", record(any())),
        )
        .refine(
            Refinement::new(
                "interaction-context",
                context.clone(),
                "Context must include required fields based on interaction type",
                context_fits_interaction,
            )
            .involving([FieldPath::field(Section::Body, "type"), context]),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn interaction(kind: &str, context: Value) -> Interaction {
        serde_json::from_value(json!({ "type": kind, "context": context })).unwrap()
    }

    #[test]
    fn test_screening_needs_job_and_questions() {
        let ctx = RuleContext::at(Utc::now());
        let full = interaction("screening", json!({"jobId": "j1", "questions": ["q"]}));
        assert!(context_fits_interaction(&full, &ctx));

        let no_questions = interaction("screening", json!({"jobId": "j1"}));
        assert!(!context_fits_interaction(&no_questions, &ctx));

        let empty_job = interaction("screening", json!({"jobId": "", "questions": []}));
        assert!(!context_fits_interaction(&empty_job, &ctx));
    }

    #[test]
    fn test_scheduling_needs_time_slot_array() {
        let ctx = RuleContext::at(Utc::now());
        assert!(context_fits_interaction(
            &interaction("scheduling", json!({"timeSlots": []})),
            &ctx
        ));
        assert!(!context_fits_interaction(
            &interaction("scheduling", json!({"timeSlots": "monday"})),
            &ctx
        ));
        assert!(context_fits_interaction(&interaction("note-taking", json!({})), &ctx));
    }

    #[test]
    fn test_is_set() {
        assert!(!is_set(None));
        assert!(!is_set(Some(&json!(null))));
        assert!(!is_set(Some(&json!(0))));
        assert!(is_set(Some(&json!(3))));
        assert!(is_set(Some(&json!({}))));
    }

    #[test]
    fn test_interaction_view_reads_body() {
        let body = json!({
            "type": "scheduling",
            "candidateId": "c1",
            "context": { "timeSlots": ["2030-06-01T09:00:00Z"] }
        });
        let interaction: Interaction = serde_json::from_value(body).unwrap();
        assert_eq!(interaction.kind, "scheduling");
        assert!(interaction.context.contains_key("timeSlots"));
    }
}
