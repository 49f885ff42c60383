//! Cross-field business rules

use chrono::{DateTime, Utc};
use hire_payload::{FieldPath, RequestPayload};
use serde::de::DeserializeOwned;
use std::fmt;
use std::marker::PhantomData;
use tracing::error;

/// Inputs a rule may depend on besides the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleContext {
    /// Validation clock
    pub now: DateTime<Utc>,
}

impl RuleContext {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

/// A predicate spanning several fields of a structurally valid payload.
///
/// The engine only calls [`CrossFieldRule::evaluate`] once every per-field
/// rule has passed and every path in [`CrossFieldRule::involves`] is present
/// in the normalised payload.
pub trait CrossFieldRule: Send + Sync + fmt::Debug {
    /// Rule name for logs
    fn name(&self) -> &str;

    /// Path the violation is reported on
    fn target(&self) -> &FieldPath;

    /// Paths that must be present for the rule to apply
    fn involves(&self) -> &[FieldPath];

    /// `Err(message)` when the rule does not hold
    fn evaluate(&self, payload: &RequestPayload, ctx: &RuleContext) -> Result<(), String>;
}

/// A rule written as a plain function over a typed view of one section.
///
/// The section is deserialised into `T` after structural validation, so the
/// predicate works with real numbers and timestamps instead of raw JSON.
pub struct Refinement<T> {
    name: String,
    target: FieldPath,
    involves: Vec<FieldPath>,
    message: String,
    predicate: fn(&T, &RuleContext) -> bool,
    _view: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> Refinement<T> {
    /// The typed view is read from the section `target` lives in.
    pub fn new(
        name: impl Into<String>,
        target: FieldPath,
        message: impl Into<String>,
        predicate: fn(&T, &RuleContext) -> bool,
    ) -> Self {
        Self {
            name: name.into(),
            target,
            involves: Vec::new(),
            message: message.into(),
            predicate,
            _view: PhantomData,
        }
    }

    #[must_use]
    pub fn involving(mut self, paths: impl IntoIterator<Item = FieldPath>) -> Self {
        self.involves.extend(paths);
        self
    }
}

impl<T> fmt::Debug for Refinement<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Refinement")
            .field("name", &self.name)
            .field("target", &self.target.to_string())
            .field("involves", &self.involves.len())
            .finish_non_exhaustive()
    }
}

impl<T: DeserializeOwned> CrossFieldRule for Refinement<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn target(&self) -> &FieldPath {
        &self.target
    }

    fn involves(&self) -> &[FieldPath] {
        &self.involves
    }

    fn evaluate(&self, payload: &RequestPayload, ctx: &RuleContext) -> Result<(), String> {
        let section = payload.section(self.target.section());
        match serde_json::from_value::<T>(section.clone()) {
            Ok(view) if (self.predicate)(&view, ctx) => Ok(()),
            Ok(_) => Err(self.message.clone()),
            Err(e) => {
                // The field rules accepted this section, so the typed view and
                // the schema disagree. Report nothing rather than a false positive.
                error!(rule = %self.name, error = %e, "refinement view does not match schema");
                Ok(())
            }
        }
    }
}
