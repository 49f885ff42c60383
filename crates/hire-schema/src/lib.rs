#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]

//! # hire-schema
//!
//! Rule tree, schema construction, enumeration catalog and registry.
//!
//! Schemas are built once at process start from declarative rule data and
//! are read-only afterwards. Everything that can be wrong with a schema
//! definition (an undefined enumeration, a pattern that does not compile,
//! inverted bounds, a refinement pointing at an undeclared field) surfaces
//! as an [`Error`] from construction, never from validation.

pub mod derive;
pub mod enums;
pub mod loader;
pub mod model;
pub mod refine;
pub mod registry;
pub mod rules;
pub mod schema;

pub use enums::{EnumCatalog, EnumSet};
pub use loader::EnumCatalogLoader;
pub use model::{
    ArrayCheck, ArrayRule, Check, DateTimeRule, EnumRule, FieldRule, FieldSpec, NumberCheck,
    NumberRule, ObjectRule, Pattern, Presence, RecordRule, StringCheck, StringFormat, StringRule,
    Temporal, Transform,
};
pub use refine::{CrossFieldRule, Refinement, RuleContext};
pub use registry::SchemaRegistry;
pub use schema::{Schema, SchemaBuilder, SectionRule};

use thiserror::Error;

/// Schema definition errors.
///
/// These are startup failures: a process that cannot build its schemas
/// must not start serving requests.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown enumeration '{0}'")]
    UnknownEnum(String),

    #[error("Invalid enumeration at {location}: {reason}")]
    InvalidEnum { location: String, reason: String },

    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid bounds at {location}: {reason}")]
    InvalidBounds { location: String, reason: String },

    #[error("Duplicate field '{field}' at {location}")]
    DuplicateField { location: String, field: String },

    #[error("Section '{section}' declared twice in schema '{schema}'")]
    DuplicateSection { schema: String, section: String },

    #[error("Invalid default at {location}: {reason}")]
    InvalidDefault { location: String, reason: String },

    #[error("Refinement '{rule}' in schema '{schema}' references undeclared path '{path}'")]
    UnknownPath {
        schema: String,
        rule: String,
        path: String,
    },

    #[error("Schema '{0}' is already registered")]
    DuplicateSchema(String),

    #[error("Schema not found: {0}")]
    NotFound(String),

    #[error("Invalid enum catalog format: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
