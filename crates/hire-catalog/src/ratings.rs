//! Candidate ratings and rating templates

use crate::common::{self, identifier};
use hire_payload::{FieldPath, Section};
use hire_schema::rules::{array, datetime, enumeration, number, object, one_of, string};
use hire_schema::{EnumCatalog, EnumRule, Refinement, Result, RuleContext, Schema};
use serde::Deserialize;

pub const CREATE_RATING: &str = "createRating";
pub const UPDATE_RATING: &str = "updateRating";
pub const GET_RATING: &str = "getRating";
pub const LIST_RATINGS: &str = "listRatings";
pub const CREATE_RATING_TEMPLATE: &str = "createRatingTemplate";
pub const SUBMIT_CANDIDATE_RATING: &str = "submitCandidateRating";

/// Largest accepted gap between the declared score and the weighted
/// average of the criteria scores
pub const SCORE_TOLERANCE: f64 = 0.5;

#[derive(Debug, Deserialize)]
struct Criterion {
    score: f64,
    weight: f64,
}

#[derive(Debug, Deserialize)]
struct ScoredRating {
    score: f64,
    criteria: Vec<Criterion>,
}

/// Weighted average of the criteria scores, `None` without weight
fn weighted_average(criteria: &[Criterion]) -> Option<f64> {
    let total_weight: f64 = criteria.iter().map(|c| c.weight).sum();
    if total_weight <= 0.0 {
        return None;
    }
    let weighted: f64 = criteria.iter().map(|c| c.score * c.weight).sum();
    Some(weighted / total_weight)
}

fn score_matches_criteria(rating: &ScoredRating, _: &RuleContext) -> bool {
    match weighted_average(&rating.criteria) {
        Some(average) => (average - rating.score).abs() <= SCORE_TOLERANCE,
        None => true,
    }
}

fn category() -> EnumRule {
    one_of(["INTERVIEW", "TECHNICAL_TEST", "SOFT_SKILLS", "OVERALL"])
}

pub fn schemas(catalog: &EnumCatalog) -> Result<Vec<Schema>> {
    let create = create_rating()?;
    let update = create.partial(UPDATE_RATING);
    Ok(vec![
        create,
        update,
        get_rating()?,
        list_ratings()?,
        create_rating_template(catalog)?,
        submit_candidate_rating()?,
    ])
}

fn create_rating() -> Result<Schema> {
    let criterion = object()
        .required(
            "name",
            string()
                .min_length(3)
                .message("Criterion name must be at least 3 characters")
                .max_length(50)
                .message("Criterion name must not exceed 50 characters"),
        )
        .required(
            "score",
            number()
                .min(0.0)
                .message("Criterion score must be at least 0")
                .max(5.0)
                .message("Criterion score must not exceed 5")
                .multiple_of(0.5)
                .message("Criterion score must be a multiple of 0.5"),
        )
        .required(
            "weight",
            number()
                .min(1.0)
                .message("Weight must be at least 1")
                .max(5.0)
                .message("Weight must not exceed 5")
                .integer(),
        )
        .optional(
            "comment",
            string()
                .max_length(500)
                .message("Criterion comment must not exceed 500 characters"),
        );

    let remark = |what: &str| {
        array(
            string()
                .min_length(3)
                .message(format!("Each {what} must be at least 3 characters"))
                .max_length(100)
                .message(format!("Each {what} must not exceed 100 characters")),
        )
    };

    Schema::builder(CREATE_RATING)
        .body(
            object()
                .required("candidateId", string().uuid().message("Invalid candidate ID format"))
                .required("recruiterId", string().uuid().message("Invalid recruiter ID format"))
                .required(
                    "score",
                    number()
                        .min(0.0)
                        .message("Score must be at least 0")
                        .max(5.0)
                        .message("Score must not exceed 5")
                        .multiple_of(0.5)
                        .message("Score must be a multiple of 0.5"),
                )
                .required(
                    "feedback",
                    string()
                        .min_length(10)
                        .message("Feedback must be at least 10 characters")
                        .max_length(2000)
                        .message("Feedback must not exceed 2000 characters"),
                )
                .required("category", category().message("Invalid rating category"))
                .required("jobId", string().uuid().message("Invalid job ID format"))
                .required(
                    "criteria",
                    array(criterion)
                        .min_items(1)
                        .message("At least one criterion is required")
                        .max_items(10)
                        .message("Maximum 10 criteria allowed"),
                )
                .optional(
                    "strengths",
                    remark("strength").max_items(5).message("Maximum 5 strengths allowed"),
                )
                .optional(
                    "weaknesses",
                    remark("weakness").max_items(5).message("Maximum 5 weaknesses allowed"),
                )
                .optional(
                    "recommendations",
                    string()
                        .max_length(1000)
                        .message("Recommendations must not exceed 1000 characters"),
                )
                .optional(
                    "interviewDate",
                    datetime()
                        .format_message("Invalid interview date format")
                        .not_future()
                        .message("Interview date cannot be in the future"),
                ),
        )
        .refine(
            Refinement::new(
                "score-matches-criteria",
                FieldPath::field(Section::Body, "score"),
                "Overall score must be consistent with criteria scores",
                score_matches_criteria,
            )
            .involving([
                FieldPath::field(Section::Body, "score"),
                FieldPath::field(Section::Body, "criteria"),
            ]),
        )
        .build()
}

fn get_rating() -> Result<Schema> {
    Schema::builder(GET_RATING)
        .params(object().required("id", identifier("Rating ID is required")))
        .build()
}

fn list_ratings() -> Result<Schema> {
    Schema::builder(LIST_RATINGS)
        .query(
            common::pagination()?
                .optional("candidateId", string())
                .optional("recruiterId", string())
                .optional("jobId", string())
                .optional("category", category()),
        )
        .build()
}

fn create_rating_template(catalog: &EnumCatalog) -> Result<Schema> {
    let template_category = object()
        .required("name", identifier("Category name is required"))
        .required("weight", number().min(0.0).max(100.0))
        .required("criteria", array(string()));

    Schema::builder(CREATE_RATING_TEMPLATE)
        .body(
            object()
                .required("name", identifier("Template name is required"))
                .required("type", enumeration(catalog.require("RatingCardType")?))
                .optional("description", string())
                .required("categories", array(template_category)),
        )
        .build()
}

fn submit_candidate_rating() -> Result<Schema> {
    let category_score = object()
        .required("categoryId", identifier("Category ID is required"))
        .required("score", number().min(0.0).max(5.0))
        .optional("comments", string());

    Schema::builder(SUBMIT_CANDIDATE_RATING)
        .params(object().required("candidateId", identifier("Candidate ID is required")))
        .body(
            object()
                .required("templateId", identifier("Template ID is required"))
                .required("overallScore", number().min(0.0).max(5.0))
                .required("recommendation", identifier("Recommendation is required"))
                .required("categoryScores", array(category_score))
                .optional("comments", string()),
        )
        .build()
}
