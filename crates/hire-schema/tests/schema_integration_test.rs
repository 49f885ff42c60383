//! Integration tests for hire-schema crate
//!
//! Building schemas against a loaded enumeration catalog and registering them.

use hire_payload::{FieldPath, Section};
use hire_schema::rules::{array, datetime, enumeration, number, object, string};
use hire_schema::{
    EnumCatalog, EnumCatalogLoader, Error, FieldRule, Presence, Refinement, RuleContext, Schema,
    SchemaRegistry,
};
use serde::Deserialize;
use std::io::Write;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Window {
    start_time: chrono::DateTime<chrono::Utc>,
    end_time: chrono::DateTime<chrono::Utc>,
}

fn ordered(w: &Window, _: &RuleContext) -> bool {
    w.end_time > w.start_time
}

fn meeting_schema(catalog: &EnumCatalog) -> hire_schema::Result<Schema> {
    Schema::builder("createMeeting")
        .body(
            object()
                .required("title", string().min_length(5).max_length(100))
                .required("startTime", datetime().future())
                .required("endTime", datetime())
                .required("meetingType", enumeration(catalog.require("MeetingType")?))
                .optional("attendees", array(object().required("userId", string()))),
        )
        .refine(
            Refinement::new(
                "end-after-start",
                FieldPath::field(Section::Body, "endTime"),
                "End time must be after start time",
                ordered,
            )
            .involving([
                FieldPath::field(Section::Body, "startTime"),
                FieldPath::field(Section::Body, "endTime"),
            ]),
        )
        .build()
}

#[test]
fn test_catalog_file_feeds_schema_construction() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile()?;
    writeln!(file, "enums:\n  MeetingType: [INTERVIEW, SCREENING]")?;

    let catalog = EnumCatalogLoader::new().load_file(file.path())?;
    let schema = meeting_schema(&catalog)?;

    let body = schema.section(Section::Body).unwrap();
    let FieldRule::Enum(rule) = &body.field("meetingType").unwrap().rule else {
        panic!("meetingType should be an enumeration");
    };
    assert!(rule.set.contains("SCREENING"));
    assert!(!rule.set.contains("VIDEO"));
    Ok(())
}

#[test]
fn test_json_catalog_file_by_extension() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
    write!(file, r#"{{"enums": {{"WorkType": ["REMOTE"]}}}}"#)?;

    let catalog = EnumCatalogLoader::new().load_file(file.path())?;
    assert_eq!(catalog.require("WorkType")?.tokens(), ["REMOTE"]);
    Ok(())
}

#[test]
fn test_missing_catalog_file_is_io_error() {
    let err = EnumCatalogLoader::new()
        .load_file(std::path::Path::new("/nonexistent/enums.yaml"))
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_unknown_enumeration_fails_before_build() {
    let catalog = EnumCatalog::new();
    let err = meeting_schema(&catalog).unwrap_err();
    assert!(matches!(err, Error::UnknownEnum(name) if name == "MeetingType"));
}

#[test]
fn test_partial_schema_registers_alongside_base() -> anyhow::Result<()> {
    let catalog = EnumCatalog::builtin();
    let create = meeting_schema(&catalog)?;
    let update = create.partial("updateMeeting");

    assert_eq!(update.refinements().len(), 1);
    let body = update.section(Section::Body).unwrap();
    assert!(body.fields.iter().all(|f| f.presence == Presence::Optional));

    let mut registry = SchemaRegistry::new();
    registry.register(create)?;
    registry.register(update)?;
    assert_eq!(
        registry.names().collect::<Vec<_>>(),
        ["createMeeting", "updateMeeting"]
    );
    Ok(())
}

#[test]
fn test_bound_checks_surface_at_construction() {
    let err = Schema::builder("createRating")
        .body(object().required("score", number().min(5.0).max(1.0)))
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("body.score"));
}
