// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

//! C8 Chat Job Service: trigger + lifecycle for the chat-job queue
//! (spec.md §4.8). Shares `Job`'s status shape but never cascades into a
//! group or an assignment.

use cond_core::{
    ChatJob, ChatJobContext, ChatJobId, ChatJobMessageView, ChatMode, ChatRole, ChatThreadId, CoreError, Harness,
    JobMetricsUpdate, JobStatus, NamespaceId,
};
use tracing::info;

use crate::{Engine, EngineError};

impl Engine {
    /// `trigger`: builds the opaque context JSON and enqueues a new
    /// `pending` chat-job for the thread's most recent eligible message
    /// (spec.md §4.8).
    pub fn trigger_chat_job(
        &self,
        password: &str,
        thread_id: ChatThreadId,
        harness: Option<Harness>,
        is_guardian_evaluation: bool,
    ) -> Result<ChatJobId, EngineError> {
        self.authorize(password)?;
        let now = self.store.now_ms();
        let id = self.store.mutate(|state| {
            let thread =
                state.get_chat_thread(thread_id).ok_or_else(|| EngineError::not_found("thread", thread_id.to_string()))?;
            let namespace_id = thread.namespace_id;
            let mode = thread.mode;
            let last_prompt_mode = thread.last_prompt_mode;
            let claude_session_id = thread.claude_session_id.clone();
            let assignment_id = thread.assignment_id;

            let messages = state.list_chat_messages_by_thread(thread_id);
            let wanted_role = if is_guardian_evaluation { ChatRole::Pm } else { ChatRole::User };
            let latest = messages
                .iter()
                .rev()
                .find(|m| m.role == wanted_role)
                .ok_or(CoreError::NoEligibleMessage)?;
            let latest_user_message = latest.content.clone();

            let effective_prompt_mode = if mode == ChatMode::Guardian {
                cond_core::PromptMode::Cook
            } else {
                Option::from(mode).unwrap_or(cond_core::PromptMode::Jam)
            };

            let context = ChatJobContext {
                thread_id,
                namespace_id,
                mode,
                effective_prompt_mode,
                last_prompt_mode,
                messages: messages
                    .iter()
                    .map(|m| ChatJobMessageView {
                        id: m.id,
                        thread_id: m.thread_id,
                        role: m.role,
                        content: m.content.clone(),
                        created_at_ms: m.created_at_ms,
                    })
                    .collect(),
                latest_user_message,
                claude_session_id,
                assignment_id,
                is_guardian_evaluation,
            };
            let context_json = serde_json::to_string(&context)
                .map_err(|e| CoreError::IllegalTransition(format!("context serialization failed: {e}")))?;

            let chat_job = ChatJob::new(thread_id, namespace_id, harness.unwrap_or_default(), context_json, now);
            Ok(state.insert_chat_job(chat_job))
        })?;
        info!(chat_job_id = %id, %thread_id, "chat_job.trigger");
        Ok(id)
    }

    /// Requires `pending`; same contract as `start_job` but with no
    /// group/assignment cascade (spec.md §4.8). `prompt` is accepted for
    /// parity with `start_job`'s signature but, unlike `Job`, `ChatJob` has
    /// no `prompt` field of its own — the runner derives the prompt from
    /// `context`, which `trigger` already built.
    pub fn start_chat_job(
        &self,
        password: &str,
        id: ChatJobId,
        _prompt: Option<String>,
    ) -> Result<ChatJob, EngineError> {
        self.authorize(password)?;
        let now = self.store.now_ms();
        let chat_job = self.store.mutate(|state| {
            let chat_job = state.get_chat_job(id).ok_or_else(|| EngineError::not_found("chat_job", id.to_string()))?;
            if chat_job.status != JobStatus::Pending {
                return Err(CoreError::IllegalTransition(format!(
                    "chat_job {id} cannot start from status {}",
                    chat_job.status
                ))
                .into());
            }
            let (namespace_id, thread_id) = (chat_job.namespace_id, chat_job.thread_id);
            state.reindex_chat_job_status(id, namespace_id, thread_id, JobStatus::Pending, JobStatus::Running);

            let chat_job = state.get_chat_job_mut(id).ok_or_else(|| EngineError::not_found("chat_job", id.to_string()))?;
            chat_job.status = JobStatus::Running;
            chat_job.started_at_ms = Some(now);
            chat_job.updated_at_ms = now;
            Ok(chat_job.clone())
        })?;
        info!(chat_job_id = %id, "chat_job.start");
        Ok(chat_job)
    }

    pub fn complete_chat_job(
        &self,
        password: &str,
        id: ChatJobId,
        result: Option<String>,
        metrics: Option<JobMetricsUpdate>,
    ) -> Result<ChatJob, EngineError> {
        let chat_job = self.finish_chat_job(password, id, JobStatus::Complete, result, metrics)?;
        info!(chat_job_id = %id, "chat_job.complete");
        Ok(chat_job)
    }

    pub fn fail_chat_job(
        &self,
        password: &str,
        id: ChatJobId,
        result: Option<String>,
        metrics: Option<JobMetricsUpdate>,
    ) -> Result<ChatJob, EngineError> {
        let chat_job = self.finish_chat_job(password, id, JobStatus::Failed, result, metrics)?;
        info!(chat_job_id = %id, "chat_job.fail");
        Ok(chat_job)
    }

    fn finish_chat_job(
        &self,
        password: &str,
        id: ChatJobId,
        new_status: JobStatus,
        result: Option<String>,
        metrics: Option<JobMetricsUpdate>,
    ) -> Result<ChatJob, EngineError> {
        self.authorize(password)?;
        let now = self.store.now_ms();
        self.store.mutate(|state| {
            let chat_job = state.get_chat_job(id).ok_or_else(|| EngineError::not_found("chat_job", id.to_string()))?;
            let admin_cancel = new_status == JobStatus::Failed && chat_job.status == JobStatus::Pending;
            if chat_job.status != JobStatus::Running && !admin_cancel {
                return Err(CoreError::IllegalTransition(format!(
                    "chat_job {id} cannot finish from status {}",
                    chat_job.status
                ))
                .into());
            }
            let (namespace_id, thread_id, old_status) = (chat_job.namespace_id, chat_job.thread_id, chat_job.status);
            state.reindex_chat_job_status(id, namespace_id, thread_id, old_status, new_status);

            let chat_job = state.get_chat_job_mut(id).ok_or_else(|| EngineError::not_found("chat_job", id.to_string()))?;
            chat_job.status = new_status;
            chat_job.completed_at_ms = Some(now);
            chat_job.result = result;
            if let Some(metrics) = metrics {
                chat_job.metrics.merge(&metrics);
            }
            chat_job.updated_at_ms = now;
            Ok(chat_job.clone())
        })
    }

    /// Non-status telemetry update; always allowed (spec.md §4.8).
    pub fn update_chat_job_metrics(
        &self,
        password: &str,
        id: ChatJobId,
        metrics: JobMetricsUpdate,
    ) -> Result<ChatJob, EngineError> {
        self.authorize(password)?;
        let now = self.store.now_ms();
        self.store.mutate(|state| {
            let chat_job =
                state.get_chat_job_mut(id).ok_or_else(|| EngineError::not_found("chat_job", id.to_string()))?;
            chat_job.metrics.merge(&metrics);
            chat_job.updated_at_ms = now;
            Ok(chat_job.clone())
        })
    }

    pub fn get_chat_job(&self, password: &str, id: ChatJobId) -> Result<ChatJob, EngineError> {
        self.authorize(password)?;
        self.store.read(|state| state.get_chat_job(id).cloned()).ok_or_else(|| EngineError::not_found("chat_job", id.to_string()))
    }

    pub fn get_pending_chat_jobs(&self, password: &str, namespace_id: NamespaceId) -> Result<Vec<ChatJob>, EngineError> {
        self.authorize(password)?;
        Ok(self
            .store
            .read(|state| state.list_chat_jobs_by_namespace_status(namespace_id, JobStatus::Pending))
            .into_iter()
            .cloned()
            .collect())
    }

    /// First `pending` chat-job for the thread, else the first `running`
    /// one, else `None`; both lookups go through the `(thread, status)`
    /// compound index (spec.md §4.8).
    pub fn get_active_chat_job_for_thread(
        &self,
        password: &str,
        thread_id: ChatThreadId,
    ) -> Result<Option<ChatJob>, EngineError> {
        self.authorize(password)?;
        Ok(self.store.read(|state| {
            state
                .list_chat_jobs_by_thread_status(thread_id, JobStatus::Pending)
                .into_iter()
                .next()
                .or_else(|| state.list_chat_jobs_by_thread_status(thread_id, JobStatus::Running).into_iter().next())
                .cloned()
        }))
    }
}

#[cfg(test)]
#[path = "chat_jobs_tests.rs"]
mod tests;
