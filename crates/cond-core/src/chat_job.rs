// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

//! ChatJob: the conversational queue. Shares the runner's worker pool and
//! the `Job`/`JobStatus` shape, but never participates in the group chain
//! or assignment status.

use serde::{Deserialize, Serialize};

use crate::assignment::AssignmentId;
use crate::chat::{ChatMessageId, ChatMode, ChatRole, ChatThreadId, PromptMode};
use crate::job::{Harness, JobMetrics, JobStatus};
use crate::namespace::NamespaceId;

crate::define_id! {
    /// Unique identifier for a chat-job.
    pub struct ChatJobId("cjb-");
}

/// One message as embedded in a [`ChatJobContext`] snapshot (spec.md §6.3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatJobMessageView {
    pub id: ChatMessageId,
    pub thread_id: ChatThreadId,
    pub role: ChatRole,
    pub content: String,
    pub created_at_ms: u64,
}

/// The opaque-to-the-engine, documented-for-the-runner `context` payload
/// built by `ChatJobService::trigger` (spec.md §6.3). Kept as a typed
/// struct on the producer side; serialized to `ChatJob::context` at
/// trigger time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatJobContext {
    pub thread_id: ChatThreadId,
    pub namespace_id: NamespaceId,
    pub mode: ChatMode,
    pub effective_prompt_mode: PromptMode,
    pub last_prompt_mode: Option<PromptMode>,
    pub messages: Vec<ChatJobMessageView>,
    pub latest_user_message: String,
    pub claude_session_id: Option<String>,
    pub assignment_id: Option<AssignmentId>,
    pub is_guardian_evaluation: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatJob {
    pub id: ChatJobId,
    pub thread_id: ChatThreadId,
    pub namespace_id: NamespaceId,
    pub harness: Harness,
    pub context: String,
    pub status: JobStatus,
    pub result: Option<String>,
    pub started_at_ms: Option<u64>,
    pub completed_at_ms: Option<u64>,
    pub metrics: JobMetrics,
    pub created_at_ms: u64,
    pub updated_at_ms: u64,
}

impl ChatJob {
    pub fn new(
        thread_id: ChatThreadId,
        namespace_id: NamespaceId,
        harness: Harness,
        context: String,
        now_ms: u64,
    ) -> Self {
        Self {
            id: ChatJobId::new(),
            thread_id,
            namespace_id,
            harness,
            context,
            status: JobStatus::Pending,
            result: None,
            started_at_ms: None,
            completed_at_ms: None,
            metrics: JobMetrics::default(),
            created_at_ms: now_ms,
            updated_at_ms: now_ms,
        }
    }
}
