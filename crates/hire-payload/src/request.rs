//! Request payload representation

use crate::path::FieldPath;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Section of an incoming request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Decoded JSON body
    Body,

    /// Path segments
    Params,

    /// Query-string pairs
    Query,
}

impl Section {
    /// All sections in reporting order
    pub const ALL: [Section; 3] = [Section::Body, Section::Params, Section::Query];

    /// Wire name of the section
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Body => "body",
            Section::Params => "params",
            Section::Query => "query",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "body" => Ok(Section::Body),
            "params" => Ok(Section::Params),
            "query" => Ok(Section::Query),
            other => Err(Error::UnknownSection(other.to_string())),
        }
    }
}

/// The three request sections handed to the validator.
///
/// Sections missing from the serialized form decode as empty objects,
/// which is what the HTTP layer passes for a request without a body or
/// query string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestPayload {
    #[serde(default = "empty_object")]
    pub body: Value,

    #[serde(default = "empty_object")]
    pub params: Value,

    #[serde(default = "empty_object")]
    pub query: Value,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

impl RequestPayload {
    /// Create a payload with three empty sections
    pub fn new() -> Self {
        Self {
            body: empty_object(),
            params: empty_object(),
            query: empty_object(),
        }
    }

    /// Decode a `{ "body": …, "params": …, "query": … }` document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the body section
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    /// Set the params section
    #[must_use]
    pub fn with_params(mut self, params: Value) -> Self {
        self.params = params;
        self
    }

    /// Set the query section
    #[must_use]
    pub fn with_query(mut self, query: Value) -> Self {
        self.query = query;
        self
    }

    /// Build the query section from raw key/value pairs.
    ///
    /// A key seen more than once becomes an array of its values in arrival
    /// order (`tags=a&tags=b` reads as `["a", "b"]`).
    #[must_use]
    pub fn with_query_pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut query = Map::new();
        for (key, value) in pairs {
            let key: String = key.into();
            let value = Value::String(value.into());
            match query.get_mut(&key) {
                Some(Value::Array(items)) => items.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
                None => {
                    query.insert(key, value);
                }
            }
        }
        self.query = Value::Object(query);
        self
    }

    /// Borrow a section
    pub fn section(&self, section: Section) -> &Value {
        match section {
            Section::Body => &self.body,
            Section::Params => &self.params,
            Section::Query => &self.query,
        }
    }

    /// Mutably borrow a section
    pub fn section_mut(&mut self, section: Section) -> &mut Value {
        match section {
            Section::Body => &mut self.body,
            Section::Params => &mut self.params,
            Section::Query => &mut self.query,
        }
    }

    /// Resolve a path to a value, if present
    pub fn get(&self, path: &FieldPath) -> Option<&Value> {
        crate::lookup::lookup(self.section(path.section()), path.segments())
    }
}

impl Default for RequestPayload {
    fn default() -> Self {
        Self::new()
    }
}
