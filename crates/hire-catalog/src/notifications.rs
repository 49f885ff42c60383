//! In-app and outbound notifications

use crate::common::{self, identifier};
use hire_schema::rules::{any, array, boolean, datetime, enumeration, object, one_of, record, string};
use hire_schema::{EnumCatalog, ObjectRule, Result, Schema};
use serde_json::json;

pub const CREATE_NOTIFICATION: &str = "createNotification";
pub const UPDATE_NOTIFICATION: &str = "updateNotification";
pub const LIST_NOTIFICATIONS: &str = "listNotifications";
pub const BATCH_UPDATE_NOTIFICATIONS: &str = "batchUpdateNotifications";
pub const NOTIFICATION_PREFERENCES: &str = "notificationPreferences";

fn notification_data() -> ObjectRule {
    object()
        .optional("entityId", string())
        .optional("entityType", string())
        .optional("actionUrl", string().url())
        .optional("imageUrl", string().url())
        .optional("metadata", record(any()))
}

fn schedule() -> Result<ObjectRule> {
    Ok(object()
        .required("sendAt", datetime())
        .optional("repeat", one_of(["NEVER", "DAILY", "WEEKLY", "MONTHLY"]))
        .optional("repeatUntil", datetime())
        .optional("timezone", common::pattern(common::TIME_ZONE)?))
}

/// Per-channel delivery options
fn channel_settings() -> ObjectRule {
    let email = object()
        .required("enabled", boolean())
        .optional("template", string())
        .optional("cc", array(string().email()))
        .optional("bcc", array(string().email()));
    let push = object()
        .required("enabled", boolean())
        .optional("sound", boolean())
        .optional("badge", boolean())
        .optional("icon", string());
    let sms = object()
        .required("enabled", boolean())
        .optional("priority", boolean());
    let slack = object()
        .required("enabled", boolean())
        .optional("channel", string());

    object()
        .optional("email", email)
        .optional("push", push)
        .optional("sms", sms)
        .optional("slack", slack)
}

pub fn schemas(catalog: &EnumCatalog) -> Result<Vec<Schema>> {
    Ok(vec![
        create_notification(catalog)?,
        update_notification(catalog)?,
        list_notifications(catalog)?,
        batch_update_notifications()?,
        notification_preferences(catalog)?,
    ])
}

fn create_notification(catalog: &EnumCatalog) -> Result<Schema> {
    let action_button = object()
        .required("label", string().max_length(50))
        .required("action", string().max_length(50))
        .optional("style", one_of(["PRIMARY", "SECONDARY", "DANGER"]));

    Schema::builder(CREATE_NOTIFICATION)
        .body(
            object()
                .required("type", enumeration(catalog.require("NotificationType")?))
                .required(
                    "title",
                    string()
                        .min_length(1)
                        .message("Notification title is required")
                        .max_length(200)
                        .message("Title too long"),
                )
                .required(
                    "message",
                    string()
                        .min_length(1)
                        .message("Notification message is required")
                        .max_length(2000)
                        .message("Message too long"),
                )
                .required("recipientId", identifier("Recipient ID is required"))
                .with_default("recipientType", one_of(["USER", "GROUP", "ALL"]), json!("USER"))
                .optional("data", notification_data())
                .with_default(
                    "priority",
                    enumeration(catalog.require("NotificationPriority")?),
                    json!("NORMAL"),
                )
                .required(
                    "channels",
                    array(enumeration(catalog.require("NotificationChannel")?))
                        .min_items(1)
                        .message("At least one channel required"),
                )
                .optional("channelSettings", channel_settings())
                .optional("schedule", schedule()?)
                .optional("expiresAt", datetime())
                .optional("category", string().max_length(50))
                .optional("tags", array(string()).max_items(10))
                .with_default("requiredAction", boolean(), json!(false))
                .optional("actionButtons", array(action_button).max_items(3)),
        )
        .build()
}

fn update_notification(catalog: &EnumCatalog) -> Result<Schema> {
    Schema::builder(UPDATE_NOTIFICATION)
        .params(object().required("id", identifier("Notification ID is required")))
        .body(
            object()
                .optional("status", enumeration(catalog.require("NotificationStatus")?))
                .optional("read", boolean())
                .optional("archived", boolean())
                .optional("actionTaken", string())
                .optional("snoozeUntil", datetime()),
        )
        .build()
}

fn list_notifications(catalog: &EnumCatalog) -> Result<Schema> {
    Schema::builder(LIST_NOTIFICATIONS)
        .query(
            common::pagination()?
                .optional("type", enumeration(catalog.require("NotificationType")?))
                .optional("status", enumeration(catalog.require("NotificationStatus")?))
                .optional("priority", enumeration(catalog.require("NotificationPriority")?))
                .optional("read", common::query_flag())
                .optional("archived", common::query_flag())
                .optional("fromDate", datetime())
                .optional("toDate", datetime())
                .optional("category", string())
                .optional("tags", array(string()))
                .optional("search", string()),
        )
        .build()
}

fn batch_update_notifications() -> Result<Schema> {
    Schema::builder(BATCH_UPDATE_NOTIFICATIONS)
        .body(
            object()
                .required(
                    "notificationIds",
                    array(string())
                        .min_items(1)
                        .message("At least one notification ID required"),
                )
                .required(
                    "action",
                    one_of(["MARK_READ", "MARK_UNREAD", "ARCHIVE", "UNARCHIVE", "DELETE"]),
                ),
        )
        .build()
}

fn notification_preferences(catalog: &EnumCatalog) -> Result<Schema> {
    let channels = catalog.require("NotificationChannel")?;

    let type_preference = object()
        .required("enabled", boolean())
        .optional("channels", array(enumeration(channels.clone())))
        .optional("priority", enumeration(catalog.require("NotificationPriority")?));

    let quiet_hours = object()
        .optional("quietHoursEnabled", boolean())
        .optional("quietHoursStart", common::pattern(common::CLOCK_TIME)?)
        .optional("quietHoursEnd", common::pattern(common::CLOCK_TIME)?)
        .optional("timezone", common::pattern(common::TIME_ZONE)?);

    Schema::builder(NOTIFICATION_PREFERENCES)
        .body(
            object()
                .required("channelPreferences", record(boolean()).keys(channels))
                .required(
                    "typePreferences",
                    record(type_preference).keys(catalog.require("NotificationType")?),
                )
                .optional("schedulePreferences", quiet_hours),
        )
        .build()
}
