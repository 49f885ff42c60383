//! Field paths for the request payload

use crate::request::Section;
use crate::{Error, Result};
use serde::{Serialize, Serializer};
use std::fmt;

/// One step of a [`FieldPath`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    /// Object key
    Key(String),

    /// Array index
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(idx) => write!(f, "{idx}"),
        }
    }
}

/// Address of a value inside a request payload.
///
/// The first segment is always the section name, so the path of the
/// `userId` of the first attendee in a request body reads
/// `body.attendees.0.userId`, which is also the form the HTTP layer reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    section: Section,
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Path of a section root
    pub fn root(section: Section) -> Self {
        Self {
            section,
            segments: Vec::new(),
        }
    }

    /// Path of a top-level field in a section
    pub fn field(section: Section, name: impl Into<String>) -> Self {
        Self::root(section).key(name)
    }

    /// Parse the dotted form, e.g. `body.attendees.0.userId`.
    ///
    /// Purely numeric segments are read as array indices.
    pub fn parse(text: &str) -> Result<Self> {
        let mut parts = text.split('.');
        let head = parts
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::invalid_path(text, "path is empty"))?;
        let section: Section = head.parse()?;

        let mut path = Self::root(section);
        for part in parts {
            if part.is_empty() {
                return Err(Error::invalid_path(text, "empty path segment"));
            }
            path = match part.parse::<usize>() {
                Ok(idx) => path.index(idx),
                Err(_) => path.key(part),
            };
        }
        Ok(path)
    }

    /// Child path under an object key
    #[must_use]
    pub fn key(mut self, name: impl Into<String>) -> Self {
        self.segments.push(PathSegment::Key(name.into()));
        self
    }

    /// Child path under an array index
    #[must_use]
    pub fn index(mut self, idx: usize) -> Self {
        self.segments.push(PathSegment::Index(idx));
        self
    }

    /// Borrowing variant of [`FieldPath::key`]
    #[must_use]
    pub fn join_key(&self, name: &str) -> Self {
        self.clone().key(name)
    }

    /// Borrowing variant of [`FieldPath::index`]
    #[must_use]
    pub fn join_index(&self, idx: usize) -> Self {
        self.clone().index(idx)
    }

    /// Section the path starts in
    pub fn section(&self) -> Section {
        self.section
    }

    /// Segments below the section root
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Whether the path addresses a whole section
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Name used in messages: the last object key, or the section name
    /// for a root path. Array indices are skipped, so an element of
    /// `skills` is still reported as `skills`.
    pub fn field_name(&self) -> &str {
        self.segments
            .iter()
            .rev()
            .find_map(|seg| match seg {
                PathSegment::Key(key) => Some(key.as_str()),
                PathSegment::Index(_) => None,
            })
            .unwrap_or_else(|| self.section.as_str())
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section.as_str())?;
        for seg in &self.segments {
            write!(f, ".{seg}")?;
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_segments() {
        let path = FieldPath::field(Section::Body, "attendees").index(0).key("userId");
        assert_eq!(path.to_string(), "body.attendees.0.userId");
    }

    #[test]
    fn test_parse_reads_indices() {
        let path = FieldPath::parse("body.criteria.2.weight").unwrap();
        assert_eq!(path.section(), Section::Body);
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("criteria".to_string()),
                PathSegment::Index(2),
                PathSegment::Key("weight".to_string()),
            ]
        );
        assert_eq!(path.to_string(), "body.criteria.2.weight");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(FieldPath::parse("").is_err());
        assert!(FieldPath::parse("headers.x").is_err());
        assert!(FieldPath::parse("body..title").is_err());
    }

    #[test]
    fn test_root_path() {
        let path = FieldPath::parse("query").unwrap();
        assert!(path.is_root());
        assert_eq!(path.field_name(), "query");
    }

    #[test]
    fn test_field_name_skips_indices() {
        let path = FieldPath::field(Section::Body, "skills").index(3);
        assert_eq!(path.field_name(), "skills");
    }

    #[test]
    fn test_ordering_is_stable() {
        let a = FieldPath::field(Section::Body, "a");
        let b = FieldPath::field(Section::Body, "b");
        let q = FieldPath::field(Section::Query, "a");
        let mut paths = vec![q.clone(), b.clone(), a.clone()];
        paths.sort();
        assert_eq!(paths, vec![a, b, q]);
    }

    #[test]
    fn test_serializes_as_string() {
        let path = FieldPath::field(Section::Params, "id");
        assert_eq!(serde_json::to_string(&path).unwrap(), "\"params.id\"");
    }
}
