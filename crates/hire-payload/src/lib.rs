#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # hire-payload
//!
//! Request payload model for the recruiting platform's request validator.
//!
//! A request reaches the validator as three JSON sections (`body`, `params`
//! and `query`). This crate holds those sections, the [`FieldPath`] used to
//! address any value inside them, and lookup helpers shared by the schema
//! and validation crates.

/// Field paths addressing values inside a payload.
pub mod path;
/// Request payload container and section accessors.
pub mod request;
/// Path resolution over JSON values.
pub mod lookup;

pub use lookup::{contains, lookup};
pub use path::{FieldPath, PathSegment};
pub use request::{RequestPayload, Section};

use thiserror::Error;

/// Errors that can occur when building or addressing payloads
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Unknown section '{0}'")]
    UnknownSection(String),

    #[error("Payload decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// Build an invalid-path error with input path and parsing reason.
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Crate-local result type for payload operations.
pub type Result<T> = std::result::Result<T, Error>;
