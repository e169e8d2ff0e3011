// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

use std::sync::Arc;

use cond_core::FakeClock;
use cond_engine::Engine;

use super::*;
use crate::protocol::Request;

const PW: &str = "s3cret";

fn engine() -> Engine {
    Engine::in_memory(Arc::new(FakeClock::new()), Some(PW.to_string()))
}

#[test]
fn ping_always_answers_pong_even_with_the_wrong_password() {
    let response = dispatch(&engine(), "nope", Request::Ping);
    assert!(matches!(response, Response::Pong));
}

#[test]
fn unauthorized_requests_become_error_responses_not_panics() {
    let response = dispatch(
        &engine(),
        "nope",
        Request::NamespaceCreate { name: "acme".into(), description: None },
    );
    match response {
        Response::Error { message } => assert!(message.contains("unauthorized")),
        other => panic!("unexpected response: {other:?}"),
    }
}

#[test]
fn namespace_create_then_get_round_trips_through_dispatch() {
    let engine = engine();
    let created = dispatch(
        &engine,
        PW,
        Request::NamespaceCreate { name: "acme".into(), description: Some("desc".into()) },
    );
    let id = match created {
        Response::NamespaceCreated { id } => id,
        other => panic!("unexpected response: {other:?}"),
    };

    let fetched = dispatch(&engine, PW, Request::NamespaceGet { id });
    match fetched {
        Response::Namespace { namespace } => {
            assert_eq!(namespace.id, id);
            assert_eq!(namespace.name, "acme");
        }
        other => panic!("unexpected response: {other:?}"),
    }
}

#[test]
fn scheduler_watch_queue_is_rejected_outside_a_streaming_connection() {
    let response = dispatch(
        &engine(),
        PW,
        Request::SchedulerWatchQueue { namespace_id: cond_core::NamespaceId::new() },
    );
    match response {
        Response::Error { message } => assert!(message.contains("streaming")),
        other => panic!("unexpected response: {other:?}"),
    }
}

#[test]
fn get_ready_jobs_on_an_empty_namespace_is_an_empty_list() {
    let engine = engine();
    let created = dispatch(&engine, PW, Request::NamespaceCreate { name: "acme".into(), description: None });
    let namespace_id = match created {
        Response::NamespaceCreated { id } => id,
        other => panic!("unexpected response: {other:?}"),
    };
    let response = dispatch(&engine, PW, Request::SchedulerGetReadyJobs { namespace_id });
    match response {
        Response::ReadyJobs { ready_jobs } => assert!(ready_jobs.is_empty()),
        other => panic!("unexpected response: {other:?}"),
    }
}
