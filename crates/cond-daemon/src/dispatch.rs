// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

//! Translates one decoded [`Request`] into an [`Engine`] call and a
//! [`Response`]. This is the only place that knows both the wire shapes
//! and the engine's operation surface (spec.md §6.2).

use cond_engine::Engine;

use crate::protocol::{Request, Response};

/// Dispatch one request. Never panics: every `EngineError` becomes
/// `Response::Error`, matching spec.md §7's "fails fast, does not swallow"
/// propagation policy at the transport boundary (the caller sees the
/// failure, the daemon does not retry it).
pub fn dispatch(engine: &Engine, password: &str, request: Request) -> Response {
    match try_dispatch(engine, password, request) {
        Ok(response) => response,
        Err(err) => err.into(),
    }
}

fn try_dispatch(engine: &Engine, password: &str, request: Request) -> Result<Response, cond_engine::EngineError> {
    use Request::*;
    Ok(match request {
        Ping => Response::Pong,

        NamespaceCreate { name, description } => {
            Response::NamespaceCreated { id: engine.create_namespace(password, &name, description)? }
        }
        NamespaceList => Response::Namespaces { namespaces: engine.list_namespaces(password)? },
        NamespaceGet { id } => Response::Namespace { namespace: engine.get_namespace(password, id)? },
        NamespaceGetByName { name } => {
            Response::Namespace { namespace: engine.get_namespace_by_name(password, &name)? }
        }
        NamespaceUpdate { id, name, description } => Response::Namespace {
            namespace: engine.update_namespace(password, id, name, description.into_patch())?,
        },
        NamespaceRemove { id } => {
            engine.remove_namespace(password, id)?;
            Response::Ok
        }
        NamespaceBackfillCounts => {
            engine.backfill_namespace_counts(password)?;
            Response::Ok
        }

        AssignmentCreate { namespace_id, north_star, independent, priority } => Response::AssignmentCreated {
            id: engine.create_assignment(password, namespace_id, &north_star, independent, priority)?,
        },
        AssignmentUpdate { id, patch } => {
            Response::Assignment { assignment: engine.update_assignment(password, id, patch.into())? }
        }
        AssignmentComplete { id } => Response::Assignment { assignment: engine.complete_assignment(password, id)? },
        AssignmentBlock { id, reason } => {
            Response::Assignment { assignment: engine.block_assignment(password, id, reason)? }
        }
        AssignmentUnblock { id } => Response::Assignment { assignment: engine.unblock_assignment(password, id)? },
        AssignmentGet { id } => Response::Assignment { assignment: engine.get_assignment(password, id)? },
        AssignmentList { namespace_id, status } => {
            Response::Assignments { assignments: engine.list_assignments(password, namespace_id, status)? }
        }
        AssignmentGetGroupChain { id } => Response::Groups { groups: engine.get_group_chain(password, id)? },
        AssignmentGetWithGroups { id } => Response::AssignmentWithGroups {
            assignment_with_groups: engine.get_assignment_with_groups(password, id)?,
        },
        AssignmentRemove { id } => Response::AssignmentRemoved { result: engine.remove_assignment(password, id)? },

        GroupCreate { assignment_id, jobs } => Response::GroupCreated {
            result: engine.create_group(password, assignment_id, jobs.into_iter().map(Into::into).collect())?,
        },
        GroupInsertAfter { after_group_id, jobs } => Response::GroupCreated {
            result: engine.insert_group_after(password, after_group_id, jobs.into_iter().map(Into::into).collect())?,
        },
        GroupList { assignment_id } => Response::Groups { groups: engine.list_groups(password, assignment_id)? },
        GroupGet { id } => Response::Group { group: engine.get_group(password, id)? },
        GroupGetWithJobs { id } => {
            Response::GroupWithJobs { group_with_jobs: engine.get_group_with_jobs(password, id)? }
        }
        JobList { group_id, status } => Response::Jobs { jobs: engine.list_jobs(password, group_id, status)? },
        JobGet { id } => Response::Job { job: engine.get_job(password, id)? },
        JobGetWithAssignment { id } => {
            Response::JobWithAssignment { job_with_assignment: engine.get_job_with_assignment(password, id)? }
        }
        JobStart { id, prompt } => Response::Job { job: engine.start_job(password, id, prompt)? },
        JobComplete { id, result, metrics } => {
            Response::Job { job: engine.complete_job(password, id, result, metrics)? }
        }
        JobFail { id, result, metrics } => Response::Job { job: engine.fail_job(password, id, result, metrics)? },
        JobUpdateMetrics { id, metrics } => {
            Response::Job { job: engine.update_job_metrics(password, id, metrics)? }
        }

        SchedulerGetReadyJobs { namespace_id } => {
            Response::ReadyJobs { ready_jobs: engine.get_ready_jobs(password, namespace_id)? }
        }
        SchedulerGetReadyChatJobs { namespace_id } => {
            Response::ChatJobs { chat_jobs: engine.get_ready_chat_jobs(password, namespace_id)? }
        }
        SchedulerGetQueueStatus { namespace_id } => {
            Response::QueueStatus { status: engine.get_queue_status(password, namespace_id)? }
        }
        SchedulerGetAllNamespaces => Response::Namespaces { namespaces: engine.get_all_namespaces(password)? },
        SchedulerGetAllAssignments { namespace_id } => {
            Response::Assignments { assignments: engine.get_all_assignments(password, namespace_id)? }
        }
        // `watch_queue` is a streaming upgrade, not a single request/response
        // pair; the listener intercepts it before reaching `dispatch` (see
        // `listener::handle_connection`). Reaching this arm means a client
        // sent it over a transport that doesn't support the upgrade.
        SchedulerWatchQueue { .. } => {
            Response::Error { message: "watch_queue requires a streaming connection".into() }
        }

        ChatThreadCreate { namespace_id, title } => {
            Response::ChatThreadCreated { id: engine.create_chat_thread(password, namespace_id, title)? }
        }
        ChatThreadList { namespace_id } => Response::ChatThreads { threads: engine.list_chat_threads(password, namespace_id)? },
        ChatThreadGet { id } => Response::ChatThread { thread: engine.get_chat_thread(password, id)? },
        ChatThreadUpdateMode { id, mode } => {
            Response::ChatThread { thread: engine.update_chat_thread_mode(password, id, mode)? }
        }
        ChatThreadUpdateTitle { id, title } => {
            Response::ChatThread { thread: engine.update_chat_thread_title(password, id, title)? }
        }
        ChatThreadUpdateSessionId { id, claude_session_id } => {
            Response::ChatThread { thread: engine.update_chat_thread_session_id(password, id, claude_session_id)? }
        }
        ChatThreadUpdateLastPromptMode { id, last_prompt_mode } => Response::ChatThread {
            thread: engine.update_chat_thread_last_prompt_mode(password, id, last_prompt_mode)?,
        },
        ChatThreadLinkAssignment { id, assignment_id } => {
            Response::ChatThread { thread: engine.link_chat_thread_assignment(password, id, assignment_id)? }
        }
        ChatThreadEnableGuardianMode { id, assignment_id } => {
            Response::ChatThread { thread: engine.enable_guardian_mode(password, id, assignment_id)? }
        }
        ChatThreadGetGuardian { assignment_id } => {
            Response::ChatThreadOption { thread: engine.get_guardian_thread(password, assignment_id)? }
        }
        ChatThreadRemove { id } => {
            engine.remove_chat_thread(password, id)?;
            Response::Ok
        }
        ChatMessageAdd { thread_id, role, content, hint } => {
            Response::ChatMessageCreated { id: engine.add_chat_message(password, thread_id, role, content, hint)? }
        }
        ChatMessageList { thread_id } => Response::ChatMessages { messages: engine.list_chat_messages(password, thread_id)? },

        ChatJobTrigger { thread_id, harness, is_guardian_evaluation } => Response::ChatJobCreated {
            id: engine.trigger_chat_job(password, thread_id, harness, is_guardian_evaluation)?,
        },
        ChatJobStart { id, prompt } => Response::ChatJob { chat_job: engine.start_chat_job(password, id, prompt)? },
        ChatJobComplete { id, result, metrics } => {
            Response::ChatJob { chat_job: engine.complete_chat_job(password, id, result, metrics)? }
        }
        ChatJobFail { id, result, metrics } => {
            Response::ChatJob { chat_job: engine.fail_chat_job(password, id, result, metrics)? }
        }
        ChatJobUpdateMetrics { id, metrics } => {
            Response::ChatJob { chat_job: engine.update_chat_job_metrics(password, id, metrics)? }
        }
        ChatJobGet { id } => Response::ChatJob { chat_job: engine.get_chat_job(password, id)? },
        ChatJobGetPending { namespace_id } => {
            Response::ChatJobs { chat_jobs: engine.get_pending_chat_jobs(password, namespace_id)? }
        }
        ChatJobGetActiveForThread { thread_id } => {
            Response::ChatJobOption { chat_job: engine.get_active_chat_job_for_thread(password, thread_id)? }
        }
    })
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
