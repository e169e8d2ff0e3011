// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

use std::sync::Arc;

use cond_core::FakeClock;
use cond_store::Store;

use crate::Engine;

const PW: &str = "s3cret";

fn engine() -> Engine {
    Engine::new(Store::new(Arc::new(FakeClock::new())), Some(PW.to_string()))
}

#[test]
fn wrong_password_is_rejected_before_any_mutation() {
    let engine = engine();
    let err = engine.create_namespace("nope", "acme", None).unwrap_err();
    assert!(matches!(err, crate::EngineError::Unauthorized));
    assert!(engine.list_namespaces(PW).unwrap().is_empty());
}

#[test]
fn create_is_idempotent_on_name() {
    let engine = engine();
    let first = engine.create_namespace(PW, "acme", None).unwrap();
    let second = engine.create_namespace(PW, "acme", Some("ignored".into())).unwrap();
    assert_eq!(first, second);
    assert_eq!(engine.list_namespaces(PW).unwrap().len(), 1);
}

#[test]
fn get_by_name_and_by_id_agree() {
    let engine = engine();
    let id = engine.create_namespace(PW, "acme", None).unwrap();
    let by_id = engine.get_namespace(PW, id).unwrap();
    let by_name = engine.get_namespace_by_name(PW, "acme").unwrap();
    assert_eq!(by_id.id, by_name.id);
}

#[test]
fn update_patches_only_given_fields() {
    let engine = engine();
    let id = engine.create_namespace(PW, "acme", Some("desc".into())).unwrap();
    let updated = engine.update_namespace(PW, id, Some("acme-2".into()), None).unwrap();
    assert_eq!(updated.name, "acme-2");
    assert_eq!(updated.description.as_deref(), Some("desc"));
}

#[test]
fn remove_unknown_namespace_is_not_found() {
    let engine = engine();
    let err = engine.get_namespace(PW, cond_core::NamespaceId::new()).unwrap_err();
    assert!(matches!(err, crate::EngineError::Core(cond_core::CoreError::NotFound { .. })));
}

#[test]
fn backfill_recomputes_drifted_counters() {
    let engine = engine();
    let ns_id = engine.create_namespace(PW, "acme", None).unwrap();
    let assignment_id = engine.create_assignment(PW, ns_id, "ship it", false, None).unwrap();

    // Simulate drift directly in the store.
    engine.store().mutate(|state| {
        if let Some(namespace) = state.get_namespace_mut(ns_id) {
            namespace.assignment_counts.pending = 99;
        }
    });

    engine.backfill_namespace_counts(PW).unwrap();
    let namespace = engine.get_namespace(PW, ns_id).unwrap();
    assert_eq!(namespace.assignment_counts.pending, 1);
    let _ = assignment_id;
}
