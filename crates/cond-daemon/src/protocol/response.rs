// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

//! The wire response surface: one variant per shape a [`super::Request`]
//! can resolve to, plus `Error` for any `EngineError`.

use cond_core::{
    Assignment, ChatJob, ChatMessage, ChatMessageId, ChatThread, Job, JobGroup, NamespaceId,
};
use cond_engine::assignments::{AssignmentWithGroups, RemoveAssignmentResult};
use cond_engine::groups::{CreateGroupResult, GroupWithJobs, JobWithAssignment};
use cond_engine::scheduler::{QueueStatus, ReadyJob};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    Pong,
    Ok,
    Error { message: String },

    NamespaceCreated { id: NamespaceId },
    Namespace { namespace: cond_core::Namespace },
    Namespaces { namespaces: Vec<cond_core::Namespace> },

    AssignmentCreated { id: cond_core::AssignmentId },
    Assignment { assignment: Assignment },
    Assignments { assignments: Vec<Assignment> },
    Groups { groups: Vec<JobGroup> },
    AssignmentWithGroups { assignment_with_groups: AssignmentWithGroups },
    AssignmentRemoved { result: RemoveAssignmentResult },

    GroupCreated { result: CreateGroupResult },
    Group { group: JobGroup },
    GroupWithJobs { group_with_jobs: GroupWithJobs },
    Jobs { jobs: Vec<Job> },
    Job { job: Job },
    JobWithAssignment { job_with_assignment: JobWithAssignment },

    ReadyJobs { ready_jobs: Vec<ReadyJob> },
    ChatJobs { chat_jobs: Vec<ChatJob> },
    QueueStatus { status: QueueStatus },
    QueueChanged { namespace_id: NamespaceId },

    ChatThreadCreated { id: cond_core::ChatThreadId },
    ChatThread { thread: ChatThread },
    ChatThreads { threads: Vec<ChatThread> },
    ChatThreadOption { thread: Option<ChatThread> },
    ChatMessageCreated { id: ChatMessageId },
    ChatMessages { messages: Vec<ChatMessage> },

    ChatJobCreated { id: cond_core::ChatJobId },
    ChatJob { chat_job: ChatJob },
    ChatJobOption { chat_job: Option<ChatJob> },
}

impl From<cond_engine::EngineError> for Response {
    fn from(err: cond_engine::EngineError) -> Self {
        Response::Error { message: err.to_string() }
    }
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
