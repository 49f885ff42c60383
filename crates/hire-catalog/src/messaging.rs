//! Messages and conversation threads

use crate::common::{self, identifier};
use hire_payload::{FieldPath, Section};
use hire_schema::rules::{array, boolean, datetime, enumeration, number, object, string};
use hire_schema::{ArrayRule, EnumCatalog, ObjectRule, Pattern, Refinement, Result, RuleContext, Schema, StringRule};
use serde::Deserialize;
use serde_json::json;

pub const CREATE_MESSAGE: &str = "createMessage";
pub const CREATE_THREAD: &str = "createThread";
pub const GET_THREAD_MESSAGES: &str = "getThreadMessages";
pub const UPDATE_MESSAGE: &str = "updateMessage";
pub const MANAGE_THREAD_PARTICIPANTS: &str = "manageThreadParticipants";

const MAX_ATTACHMENT_BYTES: f64 = 10.0 * 1024.0 * 1024.0;
const MIME_TYPE: &str = r"^[a-zA-Z0-9]+/[a-zA-Z0-9\-\+\.]+$";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParticipantChanges {
    #[serde(default)]
    add_participants: Vec<String>,
    #[serde(default)]
    remove_participants: Vec<String>,
}

fn changes_participants(changes: &ParticipantChanges, _: &RuleContext) -> bool {
    !changes.add_participants.is_empty() || !changes.remove_participants.is_empty()
}

fn attachments() -> Result<ArrayRule> {
    let attachment = object()
        .required("name", string().max_length(255).message("File name too long"))
        .required("url", string().url().message("Invalid attachment URL"))
        .required(
            "type",
            string().pattern(Pattern::new(MIME_TYPE)?).message("Invalid MIME type"),
        )
        .optional(
            "size",
            number().max(MAX_ATTACHMENT_BYTES).message("File size exceeds 10MB"),
        );
    Ok(array(attachment).max_items(10).message("Too many attachments"))
}

fn metadata(catalog: &EnumCatalog) -> Result<ObjectRule> {
    Ok(object()
        .with_default("isRead", boolean(), json!(false))
        .with_default("isArchived", boolean(), json!(false))
        .with_default("isFlagged", boolean(), json!(false))
        .with_default(
            "priority",
            enumeration(catalog.require("MessagePriority")?),
            json!("NORMAL"),
        )
        .optional("scheduledFor", datetime())
        .optional("expiresAt", datetime()))
}

fn content() -> StringRule {
    string()
        .min_length(1)
        .message("Message content is required")
        .max_length(10000)
        .message("Message too long")
}

fn subject() -> StringRule {
    string().max_length(200).message("Subject too long")
}

pub fn schemas(catalog: &EnumCatalog) -> Result<Vec<Schema>> {
    Ok(vec![
        create_message(catalog)?,
        create_thread(catalog)?,
        get_thread_messages(catalog)?,
        update_message(catalog)?,
        manage_thread_participants()?,
    ])
}

fn create_message(catalog: &EnumCatalog) -> Result<Schema> {
    Schema::builder(CREATE_MESSAGE)
        .body(
            object()
                .required("content", content())
                .required("recipientId", identifier("Recipient ID is required"))
                .optional("threadId", string())
                .optional("subject", subject())
                .with_default(
                    "visibility",
                    enumeration(catalog.require("CommentVisibility")?),
                    json!("PRIVATE"),
                )
                .optional("attachments", attachments()?)
                .optional("metadata", metadata(catalog)?)
                .optional("replyTo", string())
                .optional(
                    "mentions",
                    array(string()).max_items(20).message("Too many mentions"),
                ),
        )
        .build()
}

fn create_thread(catalog: &EnumCatalog) -> Result<Schema> {
    Schema::builder(CREATE_THREAD)
        .body(
            object()
                .required("type", enumeration(catalog.require("ThreadType")?))
                .required(
                    "participants",
                    array(string())
                        .min_items(1)
                        .message("At least one participant required")
                        .max_items(50)
                        .message("Too many participants"),
                )
                .optional("subject", subject())
                .required(
                    "initialMessage",
                    object()
                        .required(
                            "content",
                            string()
                                .min_length(1)
                                .message("Initial message content is required")
                                .max_length(10000)
                                .message("Message too long"),
                        )
                        .optional("attachments", attachments()?)
                        .optional("metadata", metadata(catalog)?),
                ),
        )
        .build()
}

fn get_thread_messages(catalog: &EnumCatalog) -> Result<Schema> {
    Schema::builder(GET_THREAD_MESSAGES)
        .params(object().required("threadId", identifier("Thread ID is required")))
        .query(
            common::pagination()?
                .optional("status", enumeration(catalog.require("MessageStatus")?))
                .optional("fromDate", datetime())
                .optional("toDate", datetime())
                .optional("searchTerm", string().max_length(100)),
        )
        .build()
}

fn update_message(catalog: &EnumCatalog) -> Result<Schema> {
    Schema::builder(UPDATE_MESSAGE)
        .params(object().required("messageId", identifier("Message ID is required")))
        .body(
            object()
                .optional("content", content())
                .optional("metadata", metadata(catalog)?)
                .optional("visibility", enumeration(catalog.require("CommentVisibility")?)),
        )
        .build()
}

fn manage_thread_participants() -> Result<Schema> {
    Schema::builder(MANAGE_THREAD_PARTICIPANTS)
        .params(object().required("threadId", identifier("Thread ID is required")))
        .body(
            object()
                .optional("addParticipants", array(string()))
                .optional("removeParticipants", array(string())),
        )
        .refine(Refinement::new(
            "participants-changed",
            FieldPath::root(Section::Body),
            "Must specify participants to add or remove",
            changes_participants,
        ))
        .build()
}
