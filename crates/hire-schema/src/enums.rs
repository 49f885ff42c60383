//! Enumeration sets and the catalog they are injected from

use crate::{Error, Result};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A fixed, finite, case-sensitive set of string tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSet {
    name: String,
    tokens: Vec<String>,
}

impl EnumSet {
    /// Create a named set. Duplicate tokens are dropped; first-seen order
    /// is kept so messages list tokens the way they were declared.
    pub fn new<I, S>(name: impl Into<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for token in tokens {
            let token = token.into();
            if !unique.contains(&token) {
                unique.push(token);
            }
        }
        Self {
            name: name.into(),
            tokens: unique,
        }
    }

    /// Anonymous set declared inline with a field
    pub fn inline<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("inline", tokens)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }
}

/// Named enumerations available to schema definitions.
///
/// The catalog stands in for the persistence layer's generated enum
/// constants: schema definitions only ever see token sets by name.
#[derive(Debug, Clone, Default)]
pub struct EnumCatalog {
    sets: BTreeMap<String, Arc<EnumSet>>,
}

impl EnumCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the recruiting platform's persistence enumerations
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for (name, tokens) in BUILTIN {
            catalog.insert(EnumSet::new(*name, tokens.iter().copied()));
        }
        catalog
    }

    /// Add or replace a set
    pub fn insert(&mut self, set: EnumSet) {
        self.sets.insert(set.name.clone(), Arc::new(set));
    }

    /// Replace or add every set from `other`
    pub fn overlay(&mut self, other: EnumCatalog) {
        self.sets.extend(other.sets);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<EnumSet>> {
        self.sets.get(name)
    }

    /// Fetch a set that a schema definition depends on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEnum`] when no set has that name.
    pub fn require(&self, name: &str) -> Result<Arc<EnumSet>> {
        self.sets
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownEnum(name.to_string()))
    }

    /// Registered set names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.sets.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

const BUILTIN: &[(&str, &[&str])] = &[
    ("MeetingType", &["INTERVIEW", "VIDEO", "PHONE", "IN_PERSON", "TEAM_MEETING", "OTHER"]),
    ("AttendeeStatus", &["PENDING", "ACCEPTED", "DECLINED", "TENTATIVE"]),
    ("MessagePriority", &["LOW", "NORMAL", "HIGH", "URGENT"]),
    ("MessageStatus", &["SENT", "DELIVERED", "READ", "FAILED"]),
    ("ThreadType", &["DIRECT", "GROUP", "CANDIDATE"]),
    ("CommentVisibility", &["PRIVATE", "TEAM", "PUBLIC"]),
    ("CalendarProvider", &["GOOGLE", "GOOGLE_WORKSPACE", "MS_365_OUTLOOK"]),
    ("IntegrationType", &["CALENDAR", "JOB_BOARD", "ATS"]),
    ("AITone", &["PROFESSIONAL_FORMAL", "PROFESSIONAL_FRIENDLY", "CASUAL"]),
    ("UserRole", &["USER", "STANDARD", "COMPANY_USER", "COMPANY_ADMIN", "ADMIN", "MEGA_ADMIN"]),
    ("CompanyMemberRole", &["RECRUITING_ADMIN", "HIRING_MANAGER", "REVIEWER", "MEMBER"]),
    ("RatingCardType", &["BASIC", "CATEGORIZED"]),
    ("EmploymentType", &["FULL_TIME", "PART_TIME", "CONTRACT", "INTERNSHIP", "FREELANCE"]),
    ("WorkType", &["REMOTE", "HYBRID", "ON_SITE"]),
    ("JobStatus", &["DRAFT", "ACTIVE", "PUBLISHED", "INTERNAL", "CONFIDENTIAL", "CLOSED", "ARCHIVED"]),
    (
        "NotificationType",
        &["APPLICATION", "INTERVIEW", "MESSAGE", "WORKFLOW", "SYSTEM", "REMINDER"],
    ),
    ("NotificationChannel", &["IN_APP", "EMAIL", "PUSH", "SMS", "SLACK"]),
    ("NotificationPriority", &["LOW", "NORMAL", "HIGH", "URGENT"]),
    ("NotificationStatus", &["UNREAD", "READ", "ARCHIVED", "DISMISSED"]),
    (
        "StageType",
        &["SCREENING", "INTERVIEW", "ASSESSMENT", "REFERENCE_CHECK", "OFFER", "HIRED", "CUSTOM"],
    ),
    (
        "ActionType",
        &["SEND_EMAIL", "SEND_NOTIFICATION", "MOVE_STAGE", "ASSIGN_USER", "SCHEDULE_MEETING"],
    ),
    ("TriggerType", &["STAGE_ENTERED", "STAGE_COMPLETED", "TIME_ELAPSED", "FORM_SUBMITTED"]),
    (
        "ConditionOperator",
        &["EQUALS", "NOT_EQUALS", "CONTAINS", "GREATER_THAN", "LESS_THAN"],
    ),
];
