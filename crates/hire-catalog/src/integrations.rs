//! Calendar, job board and ATS integrations
//!
//! All three share a block of sync settings; each integration spreads its
//! own settings over it.

use crate::common::{self, identifier};
use hire_schema::rules::{array, boolean, datetime, enumeration, number, object, one_of, record, string};
use hire_schema::{EnumCatalog, ObjectRule, Result, Schema};
use serde_json::json;

pub const CALENDAR_INTEGRATION: &str = "calendarIntegration";
pub const JOB_BOARD_INTEGRATION: &str = "jobBoardIntegration";
pub const ATS_INTEGRATION: &str = "atsIntegration";

/// Settings every integration understands
fn common_settings() -> ObjectRule {
    object()
        .with_default("enabled", boolean(), json!(true))
        .with_default("autoSync", boolean(), json!(true))
        // minutes
        .optional("syncInterval", number().min(5.0).max(1440.0))
        .with_default("notifications", boolean(), json!(true))
        .with_default("errorNotifications", boolean(), json!(true))
}

pub fn schemas(catalog: &EnumCatalog) -> Result<Vec<Schema>> {
    Ok(vec![
        calendar_integration(catalog)?,
        job_board_integration(catalog)?,
        ats_integration(catalog)?,
    ])
}

fn calendar_integration(catalog: &EnumCatalog) -> Result<Schema> {
    let working_hours = object()
        .required("start", common::pattern(common::CLOCK_TIME)?)
        .required("end", common::pattern(common::CLOCK_TIME)?)
        .required("daysOfWeek", array(number().min(0.0).max(6.0)));

    let settings = common_settings().extend(
        object()
            .optional("defaultCalendarId", string())
            .with_default(
                "defaultMeetingDuration",
                number().min(15.0).max(180.0),
                json!(60),
            )
            .optional("defaultTimeZone", common::pattern(common::TIME_ZONE)?)
            .optional(
                "defaultReminderMinutes",
                array(number().min(0.0).max(10080.0)),
            )
            .optional("workingHours", working_hours),
    );

    Schema::builder(CALENDAR_INTEGRATION)
        .body(
            object()
                .required("type", common::member(catalog, "IntegrationType", "CALENDAR")?)
                .required("provider", enumeration(catalog.require("CalendarProvider")?))
                .required("accessToken", identifier("Access token is required"))
                .optional("refreshToken", string())
                .optional("expiresAt", datetime())
                .optional("settings", settings),
        )
        .build()
}

fn job_board_integration(catalog: &EnumCatalog) -> Result<Schema> {
    let posting_template = object()
        .with_default("includeCompanyLogo", boolean(), json!(true))
        .with_default("includeCompanyDescription", boolean(), json!(true))
        .with_default("includeSalary", boolean(), json!(false))
        .with_default("includeRemoteOption", boolean(), json!(true));

    let reposting_rules = object()
        .with_default("enabled", boolean(), json!(false))
        .optional("minApplications", number().min(0.0))
        .optional("maxReposts", number().min(1.0).max(10.0))
        .optional("waitDays", number().min(1.0).max(30.0));

    let settings = common_settings().extend(
        object()
            .with_default("autoPost", boolean(), json!(false))
            .optional("categories", array(string()).max_items(20))
            .optional("locations", array(string()).max_items(50))
            // days
            .with_default("defaultDuration", number().min(1.0).max(90.0), json!(30))
            .optional("budgetLimit", number().min(0.0))
            .optional("postingTemplate", posting_template)
            .optional("jobRepostingRules", reposting_rules),
    );

    Schema::builder(JOB_BOARD_INTEGRATION)
        .body(
            object()
                .required("type", common::member(catalog, "IntegrationType", "JOB_BOARD")?)
                .required("provider", identifier("Provider name is required"))
                .required("apiKey", identifier("API key is required"))
                .optional("settings", settings),
        )
        .build()
}

fn ats_integration(catalog: &EnumCatalog) -> Result<Schema> {
    let settings = common_settings().extend(
        object()
            .required(
                "syncFields",
                array(string())
                    .min_items(1)
                    .message("At least one field must be selected for sync"),
            )
            .with_default(
                "syncDirection",
                one_of(["import", "export", "bidirectional"]),
                json!("bidirectional"),
            )
            .with_default(
                "conflictResolution",
                one_of(["keepSource", "keepTarget", "newest", "manual"]),
                json!("manual"),
            )
            .optional("customFieldMappings", record(string())),
    );

    Schema::builder(ATS_INTEGRATION)
        .body(
            object()
                .required("type", common::member(catalog, "IntegrationType", "ATS")?)
                .required("provider", identifier("Provider name is required"))
                .required("apiKey", identifier("API key is required"))
                .optional("settings", settings),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hire_payload::Section;

    #[test]
    fn test_settings_spread_over_common_block() {
        let schema = calendar_integration(&EnumCatalog::builtin()).unwrap();
        let body = schema.section(Section::Body).unwrap();
        let hire_schema::FieldRule::Object(settings) = &body.field("settings").unwrap().rule else {
            panic!("settings should be an object");
        };
        let names: Vec<_> = settings.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(&names[..5], ["enabled", "autoSync", "syncInterval", "notifications", "errorNotifications"]);
        assert!(names.contains(&"workingHours"));
    }

    #[test]
    fn test_integration_type_must_exist_in_catalog() {
        let mut catalog = EnumCatalog::builtin();
        catalog.insert(hire_schema::EnumSet::new("IntegrationType", ["CALENDAR"]));
        assert!(calendar_integration(&catalog).is_ok());
        assert!(ats_integration(&catalog).is_err());
    }
}
