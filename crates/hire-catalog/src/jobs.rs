//! Job offers

use crate::common::{self, identifier};
use hire_payload::{FieldPath, Section};
use hire_schema::rules::{array, boolean, datetime, enumeration, number, object, one_of, string};
use hire_schema::{ArrayRule, EnumCatalog, Pattern, Refinement, Result, RuleContext, Schema};
use serde::Deserialize;

pub const CREATE_JOB: &str = "createJob";
pub const UPDATE_JOB: &str = "updateJob";
pub const LIST_JOBS: &str = "listJobs";
pub const GET_JOB: &str = "getJob";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SalaryRange {
    salary_min: f64,
    salary_max: f64,
}

fn max_above_min(range: &SalaryRange, _: &RuleContext) -> bool {
    range.salary_max > range.salary_min
}

/// List of short statements, `singular`/`plural` used in the messages
fn statements(singular: &str, plural: &str, min: usize, max: usize, items: usize) -> ArrayRule {
    array(
        string()
            .min_length(min)
            .message(format!("Each {singular} must be at least {min} characters"))
            .max_length(max)
            .message(format!("Each {singular} must not exceed {max} characters")),
    )
    .min_items(1)
    .message(format!("At least one {singular} is required"))
    .max_items(items)
    .message(format!("Maximum {items} {plural} allowed"))
}

pub fn schemas(catalog: &EnumCatalog) -> Result<Vec<Schema>> {
    let create = create_job(catalog)?;
    let update = create.partial(UPDATE_JOB);
    Ok(vec![create, update, list_jobs(catalog)?, get_job()?])
}

fn create_job(catalog: &EnumCatalog) -> Result<Schema> {
    let location = object()
        .optional(
            "city",
            string().min_length(2).message("City must be at least 2 characters"),
        )
        .required(
            "country",
            string().length(2).message("Country must be a 2-letter ISO code"),
        )
        .optional("remote", boolean())
        .optional(
            "timezone",
            string()
                .pattern(Pattern::new(r"^[A-Z][a-z]+/[A-Z][a-z]+$")?)
                .message("Invalid timezone format"),
        );

    let min = FieldPath::field(Section::Body, "salaryMin");
    let max = FieldPath::field(Section::Body, "salaryMax");

    Schema::builder(CREATE_JOB)
        .body(
            object()
                .required(
                    "title",
                    string()
                        .min_length(5)
                        .message("Job title must be at least 5 characters")
                        .max_length(100)
                        .message("Job title must not exceed 100 characters")
                        .pattern(Pattern::new(common::TITLE)?)
                        .message("Job title contains invalid characters"),
                )
                .required(
                    "description",
                    string()
                        .min_length(50)
                        .message("Job description must be at least 50 characters")
                        .max_length(5000)
                        .message("Job description must not exceed 5000 characters"),
                )
                .required(
                    "employmentType",
                    enumeration(catalog.require("EmploymentType")?)
                        .message("Invalid employment type"),
                )
                .required(
                    "workType",
                    enumeration(catalog.require("WorkType")?).message("Invalid work type"),
                )
                .optional(
                    "salaryMin",
                    number()
                        .positive()
                        .message("Minimum salary must be positive")
                        .min(1000.0)
                        .message("Minimum salary must be at least 1000"),
                )
                .optional(
                    "salaryMax",
                    number().positive().message("Maximum salary must be positive"),
                )
                .optional(
                    "currency",
                    string()
                        .pattern(Pattern::new(r"^[A-Z]{3}$")?)
                        .message("Currency must be a 3-letter ISO code"),
                )
                .optional(
                    "departmentName",
                    string()
                        .min_length(2)
                        .message("Department name must be at least 2 characters")
                        .max_length(50)
                        .message("Department name must not exceed 50 characters"),
                )
                .optional("location", location)
                .required(
                    "requirements",
                    statements("requirement", "requirements", 5, 200, 15),
                )
                .required(
                    "responsibilities",
                    statements("responsibility", "responsibilities", 5, 200, 15),
                )
                .optional("skills", statements("skill", "skills", 2, 30, 20))
                .optional(
                    "experienceLevel",
                    one_of(["ENTRY", "JUNIOR", "MID", "SENIOR", "LEAD", "MANAGER"]),
                )
                .optional(
                    "deadline",
                    datetime()
                        .format_message("Invalid deadline date format")
                        .future()
                        .message("Deadline must be in the future"),
                ),
        )
        .refine(
            Refinement::new(
                "salary-range",
                max.clone(),
                "Maximum salary must be greater than minimum salary",
                max_above_min,
            )
            .involving([min, max]),
        )
        .build()
}

fn list_jobs(catalog: &EnumCatalog) -> Result<Schema> {
    Schema::builder(LIST_JOBS)
        .query(
            common::pagination()?
                .optional("status", enumeration(catalog.require("JobStatus")?))
                .optional("companyId", string())
                .optional("search", string()),
        )
        .build()
}

fn get_job() -> Result<Schema> {
    Schema::builder(GET_JOB)
        .params(object().required("id", identifier("Job ID is required")))
        .build()
}
