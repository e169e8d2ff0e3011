// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

use std::sync::Arc;

use cond_core::{AssignmentStatus, ChatRole, FakeClock, Harness};
use cond_store::Store;

use crate::groups::NewJob;
use crate::Engine;

const PW: &str = "s3cret";

fn engine_with_namespace() -> (Engine, cond_core::NamespaceId) {
    let engine = Engine::new(Store::new(Arc::new(FakeClock::new())), Some(PW.to_string()));
    let ns_id = engine.create_namespace(PW, "acme", None).unwrap();
    (engine, ns_id)
}

fn job(job_type: &str, harness: Harness) -> NewJob {
    NewJob::new(job_type, harness, None)
}

#[test]
fn empty_namespace_has_no_ready_jobs() {
    let (engine, ns_id) = engine_with_namespace();
    assert!(engine.get_ready_jobs(PW, ns_id).unwrap().is_empty());
}

#[test]
fn single_job_happy_path() {
    let (engine, ns_id) = engine_with_namespace();
    let assignment_id = engine.create_assignment(PW, ns_id, "x", false, None).unwrap();
    engine.create_group(PW, assignment_id, vec![job("impl", Harness::Claude)]).unwrap();

    let ready = engine.get_ready_jobs(PW, ns_id).unwrap();
    assert_eq!(ready.len(), 1);
    assert!(ready[0].accumulated_results.is_empty());

    engine.start_job(PW, ready[0].job.id, None).unwrap();
    assert!(engine.get_ready_jobs(PW, ns_id).unwrap().is_empty(), "running group blocks further dispatch");

    engine.complete_job(PW, ready[0].job.id, Some("ok".into()), None).unwrap();
    assert!(engine.get_ready_jobs(PW, ns_id).unwrap().is_empty(), "chain is exhausted");

    let assignment = engine.get_assignment(PW, assignment_id).unwrap();
    assert_eq!(assignment.status, AssignmentStatus::Active);

    let groups = engine.get_group_chain(PW, assignment_id).unwrap();
    assert_eq!(groups[0].aggregated_result.as_deref(), Some("## impl\nok"));
}

#[test]
fn parallel_fanout_all_ready_together_and_labeled_abc() {
    let (engine, ns_id) = engine_with_namespace();
    let assignment_id = engine.create_assignment(PW, ns_id, "x", true, None).unwrap();
    engine
        .create_group(
            PW,
            assignment_id,
            vec![job("review", Harness::Claude), job("review", Harness::Codex), job("review", Harness::Gemini)],
        )
        .unwrap();

    let ready = engine.get_ready_jobs(PW, ns_id).unwrap();
    assert_eq!(ready.len(), 3, "all jobs in one group are ready simultaneously");

    let ids: Vec<_> = ready.iter().map(|r| r.job.id).collect();
    // Complete out of order; results still land in natural iteration order.
    engine.start_job(PW, ids[0], None).unwrap();
    engine.start_job(PW, ids[1], None).unwrap();
    engine.start_job(PW, ids[2], None).unwrap();
    engine.complete_job(PW, ids[2], Some("c".into()), None).unwrap();
    engine.complete_job(PW, ids[0], Some("a".into()), None).unwrap();
    engine.complete_job(PW, ids[1], Some("b".into()), None).unwrap();

    let groups = engine.get_group_chain(PW, assignment_id).unwrap();
    assert_eq!(groups[0].status, cond_core::GroupStatus::Complete);
    assert_eq!(groups[0].aggregated_result.as_deref(), Some("## review A\na\n\n---\n\n## review B\nb\n\n---\n\n## review C\nc"));
}

#[test]
fn mixed_success_and_failure_group_completes_if_any_succeeded() {
    let (engine, ns_id) = engine_with_namespace();
    let assignment_id = engine.create_assignment(PW, ns_id, "x", true, None).unwrap();
    let created =
        engine.create_group(PW, assignment_id, vec![job("review", Harness::Claude), job("review", Harness::Codex)]).unwrap();

    engine.start_job(PW, created.job_ids[0], None).unwrap();
    engine.start_job(PW, created.job_ids[1], None).unwrap();
    engine.fail_job(PW, created.job_ids[0], Some("boom".into()), None).unwrap();
    engine.complete_job(PW, created.job_ids[1], Some("ok".into()), None).unwrap();

    let groups = engine.get_group_chain(PW, assignment_id).unwrap();
    assert_eq!(groups[0].status, cond_core::GroupStatus::Complete);
}

#[test]
fn all_failed_group_fails() {
    let (engine, ns_id) = engine_with_namespace();
    let assignment_id = engine.create_assignment(PW, ns_id, "x", true, None).unwrap();
    let created =
        engine.create_group(PW, assignment_id, vec![job("review", Harness::Claude), job("review", Harness::Codex)]).unwrap();

    engine.start_job(PW, created.job_ids[0], None).unwrap();
    engine.start_job(PW, created.job_ids[1], None).unwrap();
    engine.fail_job(PW, created.job_ids[0], Some("boom1".into()), None).unwrap();
    engine.fail_job(PW, created.job_ids[1], Some("boom2".into()), None).unwrap();

    let groups = engine.get_group_chain(PW, assignment_id).unwrap();
    assert_eq!(groups[0].status, cond_core::GroupStatus::Failed);
}

/// Scenario 4 (spec.md §8): among pending sequential assignments, only the
/// lowest `(priority, created_at)` one contributes ready jobs (P9).
#[test]
fn sequential_gate_picks_lowest_priority_pending() {
    let (engine, ns_id) = engine_with_namespace();
    let a1 = engine.create_assignment(PW, ns_id, "a1", false, Some(5)).unwrap();
    let a2 = engine.create_assignment(PW, ns_id, "a2", false, Some(1)).unwrap();
    engine.create_group(PW, a1, vec![job("impl", Harness::Claude)]).unwrap();
    let a2_job_id = engine.create_group(PW, a2, vec![job("impl", Harness::Claude)]).unwrap().job_ids[0];

    let ready = engine.get_ready_jobs(PW, ns_id).unwrap();
    assert_eq!(ready.len(), 1);
    assert_eq!(ready[0].assignment.id, a2, "lower priority number wins");
    assert_eq!(ready[0].job.id, a2_job_id);

    engine.start_job(PW, a2_job_id, None).unwrap();
    assert_eq!(engine.get_assignment(PW, a2).unwrap().status, AssignmentStatus::Active);

    // A2 is now active but its sole group is running: no ready jobs at all.
    assert!(engine.get_ready_jobs(PW, ns_id).unwrap().is_empty());

    engine.complete_job(PW, a2_job_id, Some("ok".into()), None).unwrap();

    // Completing a2's only job finishes its chain; a1 becomes the candidate.
    let ready = engine.get_ready_jobs(PW, ns_id).unwrap();
    assert_eq!(ready.len(), 1);
    assert_eq!(ready[0].assignment.id, a1);
}

#[test]
fn independent_assignments_never_compete_for_the_sequential_slot() {
    let (engine, ns_id) = engine_with_namespace();
    let sequential = engine.create_assignment(PW, ns_id, "seq", false, Some(1)).unwrap();
    let independent_a = engine.create_assignment(PW, ns_id, "ind-a", true, None).unwrap();
    let independent_b = engine.create_assignment(PW, ns_id, "ind-b", true, None).unwrap();
    engine.create_group(PW, sequential, vec![job("impl", Harness::Claude)]).unwrap();
    engine.create_group(PW, independent_a, vec![job("impl", Harness::Claude)]).unwrap();
    engine.create_group(PW, independent_b, vec![job("impl", Harness::Claude)]).unwrap();

    let ready = engine.get_ready_jobs(PW, ns_id).unwrap();
    assert_eq!(ready.len(), 3, "one sequential winner plus both independents");
}

#[test]
fn blocked_and_complete_assignments_never_surface_ready_jobs() {
    let (engine, ns_id) = engine_with_namespace();
    let assignment_id = engine.create_assignment(PW, ns_id, "x", true, None).unwrap();
    engine.create_group(PW, assignment_id, vec![job("impl", Harness::Claude)]).unwrap();
    engine.block_assignment(PW, assignment_id, "waiting on human").unwrap();
    assert!(engine.get_ready_jobs(PW, ns_id).unwrap().is_empty());

    engine.complete_assignment(PW, assignment_id).unwrap();
    assert!(engine.get_ready_jobs(PW, ns_id).unwrap().is_empty());
}

/// Scenario 5 (spec.md §8): a `pm` group resets `accumulatedResults` and
/// `groupIndex` but — per the literal §4.6.2 algorithm ("do not update
/// lastNonPmGroupResults") — leaves `previousNonPmGroupResults` and
/// `r1GroupResults` exactly as they were. See DESIGN.md for why this
/// implementation follows the algorithm text over §8's looser "reset both"
/// paraphrase.
#[test]
fn pm_group_resets_accumulated_results_but_not_the_other_two_snapshots() {
    let (engine, ns_id) = engine_with_namespace();
    let assignment_id = engine.create_assignment(PW, ns_id, "x", true, None).unwrap();

    let g1 = engine.create_group(PW, assignment_id, vec![job("impl", Harness::Claude)]).unwrap();
    run_single(&engine, g1.job_ids[0], "g1-result");

    let g2 = engine
        .insert_group_after(
            PW,
            g1.group_id,
            vec![job("review", Harness::Claude), job("review", Harness::Codex), job("review", Harness::Gemini)],
        )
        .unwrap();

    // Before G2 finishes, the ready review jobs see G1 as their immediate
    // predecessor and an empty r1 (no review group has been entered yet).
    let ready = engine.get_ready_jobs(PW, ns_id).unwrap();
    assert_eq!(ready.len(), 3);
    assert_eq!(ready[0].previous_non_pm_group_results.len(), 1);
    assert_eq!(ready[0].previous_non_pm_group_results[0].result.as_deref(), Some("g1-result"));
    assert!(ready[0].r1_group_results.is_empty());

    run_all(&engine, &[g2.job_ids[0], g2.job_ids[1], g2.job_ids[2]], &["a", "b", "c"]);

    let g3 = engine.insert_group_after(PW, g2.group_id, vec![job("pm", Harness::Claude)]).unwrap();

    // The pm job's own dispatch: accumulated now holds G1 + G2's three
    // results; r1 was snapshotted to G1 at entry to the review group.
    let ready = engine.get_ready_jobs(PW, ns_id).unwrap();
    assert_eq!(ready.len(), 1);
    assert_eq!(ready[0].accumulated_results.len(), 4);
    assert_eq!(ready[0].r1_group_results.len(), 1);
    assert_eq!(ready[0].r1_group_results[0].result.as_deref(), Some("g1-result"));
    let r1_before_pm = ready[0].r1_group_results.clone();

    run_single(&engine, g3.job_ids[0], "pm-result");

    let g4 = engine.insert_group_after(PW, g3.group_id, vec![job("impl", Harness::Claude)]).unwrap();

    let ready = engine.get_ready_jobs(PW, ns_id).unwrap();
    assert_eq!(ready.len(), 1);
    assert!(ready[0].accumulated_results.is_empty(), "pm resets accumulated_results");
    assert_eq!(
        ready[0].previous_non_pm_group_results.len(),
        3,
        "lastNonPmGroupResults is left untouched by the pm group, so it still names G2"
    );
    assert_eq!(ready[0].r1_group_results, r1_before_pm, "pm does not touch r1GroupResults either");

    run_single(&engine, g4.job_ids[0], "g4-result");

    // A fresh review group after G4: the new ready job's accumulated set
    // now contains just G4 (accumulated was cleared at the pm), and r1 is
    // still untouched (the snapshot only updates when a review group
    // itself is stepped over as terminal, which hasn't happened yet).
    let g5 = engine.insert_group_after(PW, g4.group_id, vec![job("review", Harness::Claude)]).unwrap();
    let ready = engine.get_ready_jobs(PW, ns_id).unwrap();
    assert_eq!(ready.len(), 1);
    assert_eq!(ready[0].accumulated_results.len(), 1);
    assert_eq!(ready[0].accumulated_results[0].result.as_deref(), Some("g4-result"));
    assert_eq!(ready[0].r1_group_results, r1_before_pm);
    let _ = g5;
}

fn run_single(engine: &Engine, job_id: cond_core::JobId, result: &str) {
    engine.start_job(PW, job_id, None).unwrap();
    engine.complete_job(PW, job_id, Some(result.to_string()), None).unwrap();
}

fn run_all(engine: &Engine, job_ids: &[cond_core::JobId], results: &[&str]) {
    for id in job_ids {
        engine.start_job(PW, *id, None).unwrap();
    }
    for (id, result) in job_ids.iter().zip(results) {
        engine.complete_job(PW, *id, Some(result.to_string()), None).unwrap();
    }
}

/// Scenario 6 (spec.md §8): chat-job scheduling is wholly independent of
/// assignment status (P8).
#[test]
fn chat_jobs_are_ready_regardless_of_a_running_sequential_assignment() {
    let (engine, ns_id) = engine_with_namespace();
    let assignment_id = engine.create_assignment(PW, ns_id, "seq", false, None).unwrap();
    let created = engine.create_group(PW, assignment_id, vec![job("impl", Harness::Claude)]).unwrap();
    engine.start_job(PW, created.job_ids[0], None).unwrap();
    assert_eq!(engine.get_assignment(PW, assignment_id).unwrap().status, AssignmentStatus::Active);

    let thread_id = engine.create_chat_thread(PW, ns_id, "t").unwrap();
    engine.add_chat_message(PW, thread_id, ChatRole::User, "hi", None).unwrap();
    let chat_job_id = engine.trigger_chat_job(PW, thread_id, None, false).unwrap();

    let ready_chat = engine.get_ready_chat_jobs(PW, ns_id).unwrap();
    assert_eq!(ready_chat.len(), 1);
    assert_eq!(ready_chat[0].id, chat_job_id);

    engine.start_chat_job(PW, chat_job_id, None).unwrap();
    engine.complete_chat_job(PW, chat_job_id, Some("done".into()), None).unwrap();

    // Completing the chat-job left the assignment's status untouched.
    assert_eq!(engine.get_assignment(PW, assignment_id).unwrap().status, AssignmentStatus::Active);
}
