// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

use cond_core::Harness;

use super::*;

#[test]
fn field_patch_keep_is_the_default_and_lowers_to_none() {
    let patch: FieldPatch<String> = FieldPatch::default();
    assert_eq!(patch, FieldPatch::Keep);
    assert_eq!(patch.into_patch(), None);
}

#[test]
fn field_patch_clear_lowers_to_some_none() {
    let patch: FieldPatch<String> = FieldPatch::Clear;
    assert_eq!(patch.into_patch(), Some(None));
}

#[test]
fn field_patch_set_lowers_to_some_some() {
    let patch = FieldPatch::Set("hello".to_string());
    assert_eq!(patch.into_patch(), Some(Some("hello".to_string())));
}

#[test]
fn field_patch_round_trips_through_json_by_tag() {
    let keep: FieldPatch<String> = FieldPatch::Keep;
    let clear: FieldPatch<String> = FieldPatch::Clear;
    let set = FieldPatch::Set("x".to_string());

    assert_eq!(serde_json::to_value(&keep).unwrap(), serde_json::json!({"op": "keep"}));
    assert_eq!(serde_json::to_value(&clear).unwrap(), serde_json::json!({"op": "clear"}));
    assert_eq!(serde_json::to_value(&set).unwrap(), serde_json::json!({"op": "set", "value": "x"}));

    for (json, expected) in [
        (serde_json::json!({"op": "keep"}), keep),
        (serde_json::json!({"op": "clear"}), clear),
        (serde_json::json!({"op": "set", "value": "x"}), set),
    ] {
        let decoded: FieldPatch<String> = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, expected);
    }
}

#[test]
fn missing_field_patch_defaults_to_keep_on_a_flattened_struct() {
    let wire: AssignmentPatchWire = serde_json::from_value(serde_json::json!({})).unwrap();
    assert_eq!(wire.artifacts, FieldPatch::Keep);
    assert_eq!(wire.north_star, None);
}

#[test]
fn new_job_wire_converts_into_engine_new_job() {
    let wire = NewJobWire { job_type: "review".into(), harness: Harness::Claude, context: Some("ctx".into()) };
    let job: cond_engine::groups::NewJob = wire.into();
    assert_eq!(job.job_type, "review");
    assert_eq!(job.context.as_deref(), Some("ctx"));
}

#[test]
fn assignment_patch_wire_converts_patches_into_engine_update() {
    let wire = AssignmentPatchWire {
        north_star: Some("ship it".into()),
        blocked_reason: FieldPatch::Clear,
        artifacts: FieldPatch::Set("notes".into()),
        ..Default::default()
    };
    let update: cond_engine::assignments::AssignmentUpdate = wire.into();
    assert_eq!(update.north_star.as_deref(), Some("ship it"));
    assert_eq!(update.blocked_reason, Some(None));
    assert_eq!(update.artifacts, Some(Some("notes".into())));
    assert_eq!(update.independent, None);
}
