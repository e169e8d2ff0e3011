// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

use cond_core::NamespaceId;

use super::*;
use crate::protocol::types::FieldPatch;

#[test]
fn envelope_flattens_password_alongside_the_tagged_request() {
    let envelope = Envelope { password: "s3cret".into(), request: Request::Ping };
    let value = serde_json::to_value(&envelope).unwrap();
    assert_eq!(value["password"], "s3cret");
    assert_eq!(value["type"], "Ping");
}

#[test]
fn envelope_password_defaults_to_empty_when_omitted() {
    let value = serde_json::json!({"type": "Ping"});
    let envelope: Envelope = serde_json::from_value(value).unwrap();
    assert_eq!(envelope.password, "");
}

#[test]
fn namespace_create_round_trips_with_optional_description_omitted() {
    let value = serde_json::json!({"type": "NamespaceCreate", "name": "acme"});
    let request: Request = serde_json::from_value(value).unwrap();
    match request {
        Request::NamespaceCreate { name, description } => {
            assert_eq!(name, "acme");
            assert_eq!(description, None);
        }
        other => panic!("unexpected request: {other:?}"),
    }
}

#[test]
fn namespace_update_description_patch_decodes_through_field_patch() {
    let value = serde_json::json!({
        "type": "NamespaceUpdate",
        "id": NamespaceId::new(),
        "description": {"op": "clear"},
    });
    let request: Request = serde_json::from_value(value).unwrap();
    match request {
        Request::NamespaceUpdate { name, description, .. } => {
            assert_eq!(name, None);
            assert_eq!(description, FieldPatch::Clear);
        }
        other => panic!("unexpected request: {other:?}"),
    }
}

#[test]
fn scheduler_watch_queue_round_trips() {
    let id = NamespaceId::new();
    let request = Request::SchedulerWatchQueue { namespace_id: id };
    let value = serde_json::to_value(&request).unwrap();
    let decoded: Request = serde_json::from_value(value).unwrap();
    match decoded {
        Request::SchedulerWatchQueue { namespace_id } => assert_eq!(namespace_id, id),
        other => panic!("unexpected request: {other:?}"),
    }
}
