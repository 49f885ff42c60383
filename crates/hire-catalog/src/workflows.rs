//! Hiring workflows, their stages and their progression

use crate::common::{self, identifier};
use hire_schema::rules::{any, array, boolean, datetime, enumeration, number, object, one_of, record, string};
use hire_schema::{ArrayRule, EnumCatalog, ObjectRule, Result, Schema, StringRule};
use serde_json::json;

pub const CREATE_WORKFLOW: &str = "createWorkflow";
pub const UPDATE_WORKFLOW: &str = "updateWorkflow";
pub const UPDATE_STAGE: &str = "updateStage";
pub const CLONE_WORKFLOW: &str = "cloneWorkflow";
pub const ASSIGN_WORKFLOW: &str = "assignWorkflow";
pub const PROGRESS_WORKFLOW: &str = "progressWorkflow";

fn description() -> StringRule {
    string().max_length(500)
}

fn workflow_id() -> StringRule {
    identifier("Workflow ID is required")
}

/// Stage configuration shared by workflow creation and stage updates
fn stage_settings(catalog: &EnumCatalog) -> Result<ObjectRule> {
    let reminders = object()
        .optional("enabled", boolean())
        .optional("frequency", one_of(["DAILY", "WEEKLY"]))
        .optional("template", string());

    let criterion = object()
        .required("name", string())
        .required("weight", number().min(1.0).max(10.0))
        .optional("required", boolean());

    let condition = object()
        .required("field", string())
        .required("operator", enumeration(catalog.require("ConditionOperator")?))
        .optional("value", any());

    let action = object()
        .required("type", enumeration(catalog.require("ActionType")?))
        .optional("params", record(any()));

    let automation = object()
        .required("trigger", enumeration(catalog.require("TriggerType")?))
        .optional("conditions", array(condition))
        .required("actions", array(action));

    Ok(object()
        // days
        .optional("timeLimit", number().min(1.0).max(90.0))
        .optional("autoProgress", boolean())
        .optional("requireApproval", boolean())
        .optional("approvers", array(string()))
        .optional("reminderSettings", reminders)
        .optional("formTemplate", string())
        .optional("scoringCriteria", array(criterion))
        .optional("automationRules", array(automation)))
}

fn stage_notifications() -> ArrayRule {
    array(
        object()
            .required("event", string())
            .required("template", string())
            .required("recipients", array(string())),
    )
}

pub fn schemas(catalog: &EnumCatalog) -> Result<Vec<Schema>> {
    let create = create_workflow(catalog)?;
    let update = create.partial(UPDATE_WORKFLOW);
    Ok(vec![
        create,
        update,
        update_stage(catalog)?,
        clone_workflow()?,
        assign_workflow()?,
        progress_workflow()?,
    ])
}

fn create_workflow(catalog: &EnumCatalog) -> Result<Schema> {
    let member = object()
        .required("userId", string())
        .required("role", one_of(["ADMIN", "EDITOR", "VIEWER"]));

    let form = object()
        .required("id", string())
        .with_default("required", boolean(), json!(true));

    let stage = object()
        .required(
            "name",
            string()
                .min_length(1)
                .message("Stage name is required")
                .max_length(100)
                .message("Stage name too long"),
        )
        .required("type", enumeration(catalog.require("StageType")?))
        .optional("description", description())
        .required("order", number().integer().min(0.0))
        .with_default("isRequired", boolean(), json!(false))
        .with_default("isParallel", boolean(), json!(false))
        .optional("dependsOn", array(string()))
        // days
        .optional("estimatedDuration", number().positive())
        .optional("settings", stage_settings(catalog)?)
        .optional("forms", array(form))
        .optional("notifications", stage_notifications());

    let metadata = object()
        .optional("category", string())
        .optional("tags", array(string()))
        .optional("color", common::pattern(r"^#[0-9A-Fa-f]{6}$")?)
        .optional("icon", string());

    Schema::builder(CREATE_WORKFLOW)
        .body(
            object()
                .required(
                    "name",
                    string()
                        .min_length(1)
                        .message("Workflow name is required")
                        .max_length(100)
                        .message("Name too long"),
                )
                .optional("description", description())
                .required("type", one_of(["RECRUITMENT", "ONBOARDING", "REVIEW", "CUSTOM"]))
                .optional("isDefault", boolean())
                .with_default("isEnabled", boolean(), json!(true))
                .with_default(
                    "visibility",
                    one_of(["PUBLIC", "PRIVATE", "TEAM"]),
                    json!("PRIVATE"),
                )
                .optional("team", array(member))
                .required(
                    "stages",
                    array(stage)
                        .min_items(1)
                        .message("At least one stage is required")
                        .max_items(20)
                        .message("Too many stages"),
                )
                .optional("metadata", metadata),
        )
        .build()
}

fn update_stage(catalog: &EnumCatalog) -> Result<Schema> {
    let form = object()
        .required("id", string())
        .required("required", boolean());

    Schema::builder(UPDATE_STAGE)
        .params(
            object()
                .required("workflowId", workflow_id())
                .required("stageId", identifier("Stage ID is required")),
        )
        .body(
            object()
                .optional("name", string().max_length(100))
                .optional("type", enumeration(catalog.require("StageType")?))
                .optional("description", description())
                .optional("order", number().integer().min(0.0))
                .optional("isRequired", boolean())
                .optional("isParallel", boolean())
                .optional("dependsOn", array(string()))
                .optional("estimatedDuration", number().positive())
                .optional("settings", stage_settings(catalog)?)
                .optional("forms", array(form))
                .optional("notifications", stage_notifications()),
        )
        .build()
}

fn clone_workflow() -> Result<Schema> {
    Schema::builder(CLONE_WORKFLOW)
        .params(object().required("workflowId", workflow_id()))
        .body(
            object()
                .required(
                    "name",
                    string()
                        .min_length(1)
                        .message("New workflow name is required")
                        .max_length(100)
                        .message("Name too long"),
                )
                .optional("description", description())
                .with_default("includeAutomations", boolean(), json!(true))
                .with_default("includeTeam", boolean(), json!(false)),
        )
        .build()
}

fn assign_workflow() -> Result<Schema> {
    Schema::builder(ASSIGN_WORKFLOW)
        .params(object().required("workflowId", workflow_id()))
        .body(
            object()
                .required("entityId", identifier("Entity ID is required"))
                .required("entityType", one_of(["JOB", "CANDIDATE", "EMPLOYEE"]))
                .optional("startAt", datetime())
                .required(
                    "assignees",
                    array(string())
                        .min_items(1)
                        .message("At least one assignee required"),
                )
                .optional("overrideSettings", record(any())),
        )
        .build()
}

fn progress_workflow() -> Result<Schema> {
    let file = object()
        .required("name", string())
        .required("url", string().url())
        .required("type", string());

    Schema::builder(PROGRESS_WORKFLOW)
        .params(
            object()
                .required("workflowId", workflow_id())
                .required("entityId", identifier("Entity ID is required")),
        )
        .body(
            object()
                .required(
                    "action",
                    one_of(["PROGRESS", "REGRESS", "JUMP", "COMPLETE", "CANCEL"]),
                )
                .optional("targetStageId", string())
                .optional("comment", string().max_length(1000))
                .optional("formData", record(any()))
                .optional("files", array(file)),
        )
        .build()
}
