//! Path resolution over JSON values

use crate::path::PathSegment;
use serde_json::Value;

/// Follow `segments` from `root`.
///
/// Returns `None` as soon as a key is missing, an index is out of bounds, or
/// a segment addresses into a scalar. A JSON `null` at the end of the path is
/// returned as-is; callers decide whether that counts as present.
pub fn lookup<'a>(root: &'a Value, segments: &[PathSegment]) -> Option<&'a Value> {
    segments.iter().try_fold(root, |current, seg| match (seg, current) {
        (PathSegment::Key(key), Value::Object(map)) => map.get(key),
        (PathSegment::Index(idx), Value::Array(items)) => items.get(*idx),
        _ => None,
    })
}

/// Whether `segments` resolve to a non-null value
pub fn contains(root: &Value, segments: &[PathSegment]) -> bool {
    lookup(root, segments).is_some_and(|v| !v.is_null())
}
