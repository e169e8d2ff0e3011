// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

//! The wire request surface: one variant per operation named in spec.md
//! §6.2, grouped by service. Every request travels inside an [`Envelope`]
//! carrying the Auth Gate password (spec.md §6.1).

use cond_core::{
    AssignmentId, AssignmentStatus, ChatJobId, ChatMessageId, ChatMode, ChatRole, ChatThreadId, GroupId, Harness,
    JobId, JobMetricsUpdate, JobStatus, NamespaceId, PromptMode,
};
use serde::{Deserialize, Serialize};

use super::types::{AssignmentPatchWire, NewJobWire};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Health check; always answered `Pong`, even if unauthorized would
    /// otherwise apply (liveness probes carry no secret).
    Ping,

    // --- Namespaces (C3, spec.md §4.2) ---
    NamespaceCreate { name: String, #[serde(default)] description: Option<String> },
    NamespaceList,
    NamespaceGet { id: NamespaceId },
    NamespaceGetByName { name: String },
    NamespaceUpdate {
        id: NamespaceId,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        description: super::types::FieldPatch<String>,
    },
    NamespaceRemove { id: NamespaceId },
    NamespaceBackfillCounts,

    // --- Assignments (C4, spec.md §4.3) ---
    AssignmentCreate {
        namespace_id: NamespaceId,
        north_star: String,
        #[serde(default)]
        independent: bool,
        #[serde(default)]
        priority: Option<i32>,
    },
    AssignmentUpdate { id: AssignmentId, patch: AssignmentPatchWire },
    AssignmentComplete { id: AssignmentId },
    AssignmentBlock { id: AssignmentId, reason: String },
    AssignmentUnblock { id: AssignmentId },
    AssignmentGet { id: AssignmentId },
    AssignmentList { namespace_id: NamespaceId, #[serde(default)] status: Option<AssignmentStatus> },
    AssignmentGetGroupChain { id: AssignmentId },
    AssignmentGetWithGroups { id: AssignmentId },
    AssignmentRemove { id: AssignmentId },

    // --- Groups / Jobs (C5, spec.md §4.4) ---
    GroupCreate { assignment_id: AssignmentId, jobs: Vec<NewJobWire> },
    GroupInsertAfter { after_group_id: GroupId, jobs: Vec<NewJobWire> },
    GroupList { assignment_id: AssignmentId },
    GroupGet { id: GroupId },
    GroupGetWithJobs { id: GroupId },
    JobList { #[serde(default)] group_id: Option<GroupId>, #[serde(default)] status: Option<JobStatus> },
    JobGet { id: JobId },
    JobGetWithAssignment { id: JobId },
    JobStart { id: JobId, #[serde(default)] prompt: Option<String> },
    JobComplete { id: JobId, #[serde(default)] result: Option<String>, #[serde(default)] metrics: Option<JobMetricsUpdate> },
    JobFail { id: JobId, #[serde(default)] result: Option<String>, #[serde(default)] metrics: Option<JobMetricsUpdate> },
    JobUpdateMetrics { id: JobId, metrics: JobMetricsUpdate },

    // --- Scheduler (C6, spec.md §4.6) ---
    SchedulerGetReadyJobs { namespace_id: NamespaceId },
    SchedulerGetReadyChatJobs { namespace_id: NamespaceId },
    SchedulerGetQueueStatus { namespace_id: NamespaceId },
    SchedulerGetAllNamespaces,
    SchedulerGetAllAssignments { namespace_id: NamespaceId },
    /// Upgrades the connection into a push stream of `Response::QueueChanged`
    /// events until the client disconnects (SPEC_FULL.md §4.6 "Live queue
    /// notification").
    SchedulerWatchQueue { namespace_id: NamespaceId },

    // --- Chat threads (C7, spec.md §4.7) ---
    ChatThreadCreate { namespace_id: NamespaceId, title: String },
    ChatThreadList { namespace_id: NamespaceId },
    ChatThreadGet { id: ChatThreadId },
    ChatThreadUpdateMode { id: ChatThreadId, mode: ChatMode },
    ChatThreadUpdateTitle { id: ChatThreadId, title: String },
    ChatThreadUpdateSessionId { id: ChatThreadId, #[serde(default)] claude_session_id: Option<String> },
    ChatThreadUpdateLastPromptMode { id: ChatThreadId, #[serde(default)] last_prompt_mode: Option<PromptMode> },
    ChatThreadLinkAssignment { id: ChatThreadId, assignment_id: AssignmentId },
    ChatThreadEnableGuardianMode { id: ChatThreadId, assignment_id: AssignmentId },
    ChatThreadGetGuardian { assignment_id: AssignmentId },
    ChatThreadRemove { id: ChatThreadId },
    ChatMessageAdd { thread_id: ChatThreadId, role: ChatRole, content: String, hint: Option<String> },
    ChatMessageList { thread_id: ChatThreadId },

    // --- Chat jobs (C8, spec.md §4.8) ---
    ChatJobTrigger {
        thread_id: ChatThreadId,
        #[serde(default)]
        harness: Option<Harness>,
        #[serde(default)]
        is_guardian_evaluation: bool,
    },
    ChatJobStart { id: ChatJobId, #[serde(default)] prompt: Option<String> },
    ChatJobComplete { id: ChatJobId, #[serde(default)] result: Option<String>, #[serde(default)] metrics: Option<JobMetricsUpdate> },
    ChatJobFail { id: ChatJobId, #[serde(default)] result: Option<String>, #[serde(default)] metrics: Option<JobMetricsUpdate> },
    ChatJobUpdateMetrics { id: ChatJobId, metrics: JobMetricsUpdate },
    ChatJobGet { id: ChatJobId },
    ChatJobGetPending { namespace_id: NamespaceId },
    ChatJobGetActiveForThread { thread_id: ChatThreadId },
}

/// Every request other than `Ping` travels wrapped with the Auth Gate
/// password (spec.md §6.1). `#[serde(flatten)]` keeps the wire shape a
/// single flat JSON object (`{"password": "...", "type": "...", ...}`)
/// rather than nesting the request under a `request` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub password: String,
    #[serde(flatten)]
    pub request: Request,
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
