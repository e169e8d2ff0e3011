// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

use std::sync::Arc;

use cond_core::{AssignmentStatus, FakeClock};
use cond_store::Store;

use crate::assignments::AssignmentUpdate;
use crate::Engine;

const PW: &str = "s3cret";

fn engine_with_namespace() -> (Engine, cond_core::NamespaceId) {
    let engine = Engine::new(Store::new(Arc::new(FakeClock::new())), Some(PW.to_string()));
    let ns_id = engine.create_namespace(PW, "acme", None).unwrap();
    (engine, ns_id)
}

#[test]
fn create_increments_pending_counter() {
    let (engine, ns_id) = engine_with_namespace();
    engine.create_assignment(PW, ns_id, "ship it", false, None).unwrap();
    let namespace = engine.get_namespace(PW, ns_id).unwrap();
    assert_eq!(namespace.assignment_counts.pending, 1);
}

#[test]
fn status_update_moves_exactly_two_counters() {
    let (engine, ns_id) = engine_with_namespace();
    let id = engine.create_assignment(PW, ns_id, "ship it", false, None).unwrap();
    engine
        .update_assignment(PW, id, AssignmentUpdate { status: Some(AssignmentStatus::Active), ..Default::default() })
        .unwrap();

    let namespace = engine.get_namespace(PW, ns_id).unwrap();
    assert_eq!(namespace.assignment_counts.pending, 0);
    assert_eq!(namespace.assignment_counts.active, 1);
}

#[test]
fn unblock_forces_active_not_pending() {
    let (engine, ns_id) = engine_with_namespace();
    let id = engine.create_assignment(PW, ns_id, "ship it", false, None).unwrap();
    engine.block_assignment(PW, id, "waiting on human").unwrap();
    let unblocked = engine.unblock_assignment(PW, id).unwrap();
    assert_eq!(unblocked.status, AssignmentStatus::Active);
    assert!(unblocked.blocked_reason.is_none());
}

#[test]
fn remove_cascades_groups_and_jobs() {
    let (engine, ns_id) = engine_with_namespace();
    let assignment_id = engine.create_assignment(PW, ns_id, "ship it", false, None).unwrap();
    engine
        .create_group(
            PW,
            assignment_id,
            vec![crate::groups::NewJob::new("impl", cond_core::Harness::Claude, None)],
        )
        .unwrap();

    let result = engine.remove_assignment(PW, assignment_id).unwrap();
    assert_eq!(result.groups_deleted, 1);
    assert_eq!(result.jobs_deleted, 1);
    assert!(engine.get_assignment(PW, assignment_id).is_err());
}

#[test]
fn remove_clears_namespace_counter_for_old_status() {
    let (engine, ns_id) = engine_with_namespace();
    let id = engine.create_assignment(PW, ns_id, "ship it", false, None).unwrap();
    engine.remove_assignment(PW, id).unwrap();
    let namespace = engine.get_namespace(PW, ns_id).unwrap();
    assert_eq!(namespace.assignment_counts.pending, 0);
}

#[test]
fn group_chain_walk_is_empty_before_any_group() {
    let (engine, ns_id) = engine_with_namespace();
    let id = engine.create_assignment(PW, ns_id, "ship it", false, None).unwrap();
    assert!(engine.get_group_chain(PW, id).unwrap().is_empty());
}
