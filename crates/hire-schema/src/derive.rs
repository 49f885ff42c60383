//! Deriving schemas from other schemas
//!
//! Update endpoints accept any subset of the fields their create endpoint
//! requires, and several integration schemas share a settings block. Both
//! are expressed by deriving from an existing definition instead of
//! repeating it.

use crate::model::{ObjectRule, Presence};
use crate::schema::{Schema, SectionRule};
use tracing::debug;

impl ObjectRule {
    /// Spread `other`'s fields into this rule.
    ///
    /// A field already declared here is replaced in place; new fields are
    /// appended in `other`'s order.
    #[must_use]
    pub fn extend(mut self, other: ObjectRule) -> Self {
        for spec in other.fields {
            match self.fields.iter_mut().find(|f| f.name == spec.name) {
                Some(existing) => *existing = spec,
                None => self.fields.push(spec),
            }
        }
        self
    }

    /// Every top-level field optional, without defaults
    #[must_use]
    pub fn partial(mut self) -> Self {
        for spec in &mut self.fields {
            spec.presence = Presence::Optional;
        }
        self
    }
}

impl Schema {
    /// Derive the update variant of a schema.
    ///
    /// Top-level fields of every section become optional and lose their
    /// defaults, so an absent field stays absent in the normalised payload.
    /// Nested rules and cross-field rules are kept; a cross-field rule is
    /// skipped at validation time when a field it involves was not sent.
    #[must_use]
    pub fn partial(&self, name: impl Into<String>) -> Schema {
        let name = name.into();
        debug!(base = %self.name, derived = %name, "deriving partial schema");
        Schema {
            name,
            sections: self
                .sections
                .iter()
                .map(|s| SectionRule {
                    section: s.section,
                    rule: s.rule.clone().partial(),
                })
                .collect(),
            refinements: self.refinements.clone(),
        }
    }
}
