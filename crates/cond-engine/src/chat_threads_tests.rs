// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

use std::sync::Arc;

use cond_core::{ChatMode, ChatRole, FakeClock, PromptMode};
use cond_store::Store;

use crate::Engine;

const PW: &str = "s3cret";

fn engine_with_namespace() -> (Engine, cond_core::NamespaceId) {
    let (engine, ns_id, _clock) = engine_with_namespace_and_clock();
    (engine, ns_id)
}

fn engine_with_namespace_and_clock() -> (Engine, cond_core::NamespaceId, FakeClock) {
    let clock = FakeClock::new();
    let engine = Engine::new(Store::new(Arc::new(clock.clone())), Some(PW.to_string()));
    let ns_id = engine.create_namespace(PW, "acme", None).unwrap();
    (engine, ns_id, clock)
}

#[test]
fn create_defaults_to_jam_mode_with_no_session() {
    let (engine, ns_id) = engine_with_namespace();
    let thread_id = engine.create_chat_thread(PW, ns_id, "onboarding").unwrap();
    let thread = engine.get_chat_thread(PW, thread_id).unwrap();
    assert_eq!(thread.mode, ChatMode::Jam);
    assert!(thread.claude_session_id.is_none());
    assert!(thread.assignment_id.is_none());
}

#[test]
fn list_is_newest_first_by_updated_at() {
    let (engine, ns_id, clock) = engine_with_namespace_and_clock();
    let t1 = engine.create_chat_thread(PW, ns_id, "first").unwrap();
    clock.advance_ms(10);
    let t2 = engine.create_chat_thread(PW, ns_id, "second").unwrap();
    clock.advance_ms(10);
    // Touch t1 so it becomes the most recently updated.
    engine.update_chat_thread_title(PW, t1, "first (renamed)").unwrap();

    let threads = engine.list_chat_threads(PW, ns_id).unwrap();
    assert_eq!(threads[0].id, t1);
    assert_eq!(threads[1].id, t2);
}

#[test]
fn add_message_bumps_thread_updated_at() {
    let (engine, ns_id, clock) = engine_with_namespace_and_clock();
    let thread_id = engine.create_chat_thread(PW, ns_id, "t").unwrap();
    let before = engine.get_chat_thread(PW, thread_id).unwrap().updated_at_ms;

    clock.advance_ms(10);
    engine.add_chat_message(PW, thread_id, ChatRole::User, "hello", None).unwrap();

    let after = engine.get_chat_thread(PW, thread_id).unwrap().updated_at_ms;
    assert!(after > before);
    let messages = engine.list_chat_messages(PW, thread_id).unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, "hello");
}

#[test]
fn add_message_carries_an_optional_hint() {
    let (engine, ns_id) = engine_with_namespace();
    let thread_id = engine.create_chat_thread(PW, ns_id, "t").unwrap();

    engine.add_chat_message(PW, thread_id, ChatRole::User, "hello", Some("ambiguous".into())).unwrap();
    engine.add_chat_message(PW, thread_id, ChatRole::Assistant, "hi back", None).unwrap();

    let messages = engine.list_chat_messages(PW, thread_id).unwrap();
    assert_eq!(messages[0].hint.as_deref(), Some("ambiguous"));
    assert!(messages[1].hint.is_none());
}

#[test]
fn update_last_prompt_mode_round_trips() {
    let (engine, ns_id) = engine_with_namespace();
    let thread_id = engine.create_chat_thread(PW, ns_id, "t").unwrap();
    engine.update_chat_thread_last_prompt_mode(PW, thread_id, Some(PromptMode::Cook)).unwrap();
    let thread = engine.get_chat_thread(PW, thread_id).unwrap();
    assert_eq!(thread.last_prompt_mode, Some(PromptMode::Cook));
}

#[test]
fn enable_guardian_mode_links_sets_mode_and_aligns_assignment() {
    let (engine, ns_id) = engine_with_namespace();
    let assignment_id = engine.create_assignment(PW, ns_id, "ship it", false, None).unwrap();
    let thread_id = engine.create_chat_thread(PW, ns_id, "guardian thread").unwrap();

    let thread = engine.enable_guardian_mode(PW, thread_id, assignment_id).unwrap();
    assert_eq!(thread.mode, ChatMode::Guardian);
    assert_eq!(thread.assignment_id, Some(assignment_id));

    let assignment = engine.get_assignment(PW, assignment_id).unwrap();
    assert_eq!(assignment.alignment_status, Some(cond_core::AlignmentStatus::Aligned));

    let guardian = engine.get_guardian_thread(PW, assignment_id).unwrap();
    assert_eq!(guardian.map(|t| t.id), Some(thread_id));
}

#[test]
fn guardian_thread_refuses_mode_change() {
    let (engine, ns_id) = engine_with_namespace();
    let assignment_id = engine.create_assignment(PW, ns_id, "ship it", false, None).unwrap();
    let thread_id = engine.create_chat_thread(PW, ns_id, "t").unwrap();
    engine.enable_guardian_mode(PW, thread_id, assignment_id).unwrap();

    let err = engine.update_chat_thread_mode(PW, thread_id, ChatMode::Jam).unwrap_err();
    assert!(matches!(err, crate::EngineError::Core(cond_core::CoreError::IllegalTransition(_))));
}

#[test]
fn guardian_thread_refuses_relinking_to_different_assignment() {
    let (engine, ns_id) = engine_with_namespace();
    let a1 = engine.create_assignment(PW, ns_id, "a1", false, None).unwrap();
    let a2 = engine.create_assignment(PW, ns_id, "a2", false, None).unwrap();
    let thread_id = engine.create_chat_thread(PW, ns_id, "t").unwrap();
    engine.enable_guardian_mode(PW, thread_id, a1).unwrap();

    let err = engine.link_chat_thread_assignment(PW, thread_id, a2).unwrap_err();
    assert!(matches!(err, crate::EngineError::Core(cond_core::CoreError::IllegalTransition(_))));
}

#[test]
fn remove_cascades_messages() {
    let (engine, ns_id) = engine_with_namespace();
    let thread_id = engine.create_chat_thread(PW, ns_id, "t").unwrap();
    engine.add_chat_message(PW, thread_id, ChatRole::User, "hi", None).unwrap();
    engine.remove_chat_thread(PW, thread_id).unwrap();

    let err = engine.get_chat_thread(PW, thread_id).unwrap_err();
    assert!(matches!(err, crate::EngineError::Core(cond_core::CoreError::NotFound { .. })));
    assert!(engine.list_chat_messages(PW, thread_id).unwrap().is_empty());
}

#[test]
fn wrong_password_is_rejected() {
    let (engine, ns_id) = engine_with_namespace();
    let err = engine.create_chat_thread("nope", ns_id, "t").unwrap_err();
    assert!(matches!(err, crate::EngineError::Unauthorized));
}
