//! Interview and meeting scheduling

use crate::common::{self, identifier};
use chrono::{DateTime, Duration, Utc};
use hire_payload::{FieldPath, Section};
use hire_schema::rules::{array, boolean, datetime, enumeration, number, object, one_of, string};
use hire_schema::{EnumCatalog, Pattern, Refinement, Result, RuleContext, Schema};
use serde::Deserialize;
use serde_json::json;

pub const CREATE_MEETING: &str = "createMeeting";
pub const UPDATE_MEETING: &str = "updateMeeting";
pub const UPDATE_ATTENDEE_STATUS: &str = "updateAttendeeStatus";

/// Longest meeting that can be booked
pub const MAX_MEETING_HOURS: i64 = 8;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MeetingWindow {
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OnlineMeeting {
    is_online: bool,
    meeting_link: Option<String>,
}

fn ends_after_start(window: &MeetingWindow, _: &RuleContext) -> bool {
    window.start_time < window.end_time
}

fn within_max_duration(window: &MeetingWindow, _: &RuleContext) -> bool {
    window.end_time - window.start_time <= Duration::hours(MAX_MEETING_HOURS)
}

fn online_has_link(meeting: &OnlineMeeting, _: &RuleContext) -> bool {
    !meeting.is_online || meeting.meeting_link.as_deref().is_some_and(|l| !l.is_empty())
}

pub fn schemas(catalog: &EnumCatalog) -> Result<Vec<Schema>> {
    let create = create_meeting(catalog)?;
    let update = create.partial(UPDATE_MEETING);
    Ok(vec![create, update, update_attendee_status(catalog)?])
}

fn create_meeting(catalog: &EnumCatalog) -> Result<Schema> {
    let agenda_item = object()
        .required(
            "topic",
            string()
                .min_length(3)
                .message("Agenda topic must be at least 3 characters")
                .max_length(100)
                .message("Agenda topic must not exceed 100 characters"),
        )
        .required(
            "duration",
            number()
                .min(1.0)
                .message("Duration must be at least 1 minute")
                .max(480.0)
                .message("Duration must not exceed 480 minutes"),
        );

    let attendee = object()
        .required("userId", string().uuid().message("Invalid user ID format"))
        .with_default("isRequired", boolean(), json!(true))
        .with_default(
            "role",
            one_of(["HOST", "PRESENTER", "ATTENDEE"]),
            json!("ATTENDEE"),
        );

    // Up to one week ahead
    let reminder = object()
        .required("type", one_of(["EMAIL", "NOTIFICATION"]))
        .required("minutesBefore", number().min(5.0).max(10080.0));

    let start = FieldPath::field(Section::Body, "startTime");
    let end = FieldPath::field(Section::Body, "endTime");

    Schema::builder(CREATE_MEETING)
        .body(
            object()
                .required(
                    "title",
                    string()
                        .min_length(5)
                        .message("Meeting title must be at least 5 characters")
                        .max_length(100)
                        .message("Meeting title must not exceed 100 characters")
                        .pattern(Pattern::new(common::TITLE)?)
                        .message("Meeting title contains invalid characters"),
                )
                .required(
                    "startTime",
                    datetime()
                        .format_message("Invalid start time format")
                        .future()
                        .message("Start time must be in the future"),
                )
                .required("endTime", datetime().format_message("Invalid end time format"))
                .required(
                    "type",
                    enumeration(catalog.require("MeetingType")?).message("Invalid meeting type"),
                )
                .optional(
                    "description",
                    string()
                        .min_length(10)
                        .message("Description must be at least 10 characters")
                        .max_length(500)
                        .message("Description must not exceed 500 characters"),
                )
                .optional(
                    "location",
                    string()
                        .min_length(5)
                        .message("Location must be at least 5 characters")
                        .max_length(200)
                        .message("Location must not exceed 200 characters"),
                )
                .required("isOnline", boolean())
                .optional(
                    "meetingPlatform",
                    one_of(["ZOOM", "GOOGLE_MEET", "MICROSOFT_TEAMS", "OTHER"]),
                )
                .optional(
                    "meetingLink",
                    string()
                        .url()
                        .message("Invalid meeting link format")
                        .pattern(Pattern::new("^https://")?)
                        .message("Meeting link must use HTTPS"),
                )
                .optional("agenda", array(agenda_item))
                .required(
                    "attendees",
                    array(attendee)
                        .min_items(1)
                        .message("At least one attendee is required")
                        .max_items(50)
                        .message("Maximum 50 attendees allowed"),
                )
                .optional("reminders", array(reminder)),
        )
        .refine(
            Refinement::new(
                "meeting-ends-after-start",
                end.clone(),
                "End time must be after start time",
                ends_after_start,
            )
            .involving([start.clone(), end.clone()]),
        )
        .refine(
            Refinement::new(
                "meeting-max-duration",
                end.clone(),
                "Meeting duration cannot exceed 8 hours",
                within_max_duration,
            )
            .involving([start, end]),
        )
        .refine(
            Refinement::new(
                "online-meeting-link",
                FieldPath::field(Section::Body, "meetingLink"),
                "Meeting link is required for online meetings",
                online_has_link,
            )
            .involving([FieldPath::field(Section::Body, "isOnline")]),
        )
        .build()
}

fn update_attendee_status(catalog: &EnumCatalog) -> Result<Schema> {
    Schema::builder(UPDATE_ATTENDEE_STATUS)
        .params(object().required("meetingId", identifier("Meeting ID is required")))
        .body(
            object()
                .required("status", enumeration(catalog.require("AttendeeStatus")?))
                .optional("message", string()),
        )
        .build()
}
