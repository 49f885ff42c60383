//! Integration tests for hire-payload
//!
//! These tests exercise the payload model the way the HTTP layer feeds it:
//! a decoded JSON body, string path params, and raw query pairs.

use hire_payload::{contains, FieldPath, PathSegment, RequestPayload, Section};
use serde_json::json;

#[test]
fn test_build_payload_from_request_parts() -> anyhow::Result<()> {
    let payload = RequestPayload::new()
        .with_body(json!({"content": "See you at 10", "attachments": []}))
        .with_params(json!({"threadId": "t-42"}))
        .with_query_pairs([("page", "1"), ("limit", "25")]);

    let thread = FieldPath::parse("params.threadId")?;
    assert_eq!(payload.get(&thread), Some(&json!("t-42")));

    let page = FieldPath::field(Section::Query, "page");
    assert_eq!(payload.get(&page), Some(&json!("1")));

    assert!(contains(payload.section(Section::Body), &[PathSegment::Key("attachments".into())]));
    Ok(())
}

#[test]
fn test_payload_document_round_trip() -> anyhow::Result<()> {
    let document = r#"{
        "body": {"score": 4.5, "criteria": [{"name": "Communication", "score": 4.5, "weight": 2}]},
        "params": {"id": "r-1"}
    }"#;
    let payload = RequestPayload::from_json(document)?;
    let encoded = serde_json::to_string(&payload)?;
    let decoded = RequestPayload::from_json(&encoded)?;

    assert_eq!(payload, decoded);
    assert_eq!(decoded.query, json!({}));
    Ok(())
}

#[test]
fn test_paths_display_in_wire_form() -> anyhow::Result<()> {
    for text in ["body", "body.criteria.0.score", "query.tags.1", "params.meetingId"] {
        assert_eq!(FieldPath::parse(text)?.to_string(), text);
    }
    Ok(())
}

#[test]
fn test_section_mut_allows_normalisation_in_place() {
    let mut payload = RequestPayload::new().with_query(json!({"page": "3"}));
    if let Some(map) = payload.section_mut(Section::Query).as_object_mut() {
        map.insert("page".to_string(), json!(3));
    }
    assert_eq!(payload.query, json!({"page": 3}));
}
