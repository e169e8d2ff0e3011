// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

//! Job: a single harness invocation and its result.

use serde::{Deserialize, Serialize};

use crate::group::GroupId;

crate::define_id! {
    /// Unique identifier for a job.
    pub struct JobId("job-");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Running,
    Complete,
    Failed,
}

crate::simple_display! {
    JobStatus {
        Pending => "pending",
        Running => "running",
        Complete => "complete",
        Failed => "failed",
    }
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Complete | JobStatus::Failed)
    }
}

/// External command-line AI harness. Opaque beyond its name to the engine;
/// invocation (CLI flags, stdout parsing) is the runner's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Harness {
    Claude,
    Codex,
    Gemini,
}

crate::simple_display! {
    Harness {
        Claude => "claude",
        Codex => "codex",
        Gemini => "gemini",
    }
}

impl Default for Harness {
    fn default() -> Self {
        Harness::Claude
    }
}

/// Runner-reported telemetry for a job. A first-person struct (Design Note
/// §9 "Polymorphic job result storage") rather than a free-form map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobMetrics {
    pub tool_call_count: u64,
    pub subagent_count: u64,
    pub total_tokens: u64,
    pub last_event_at_ms: Option<u64>,
    pub exit_forced: bool,
}

/// A partial metrics update, as reported by the runner on `complete`,
/// `fail`, or `updateMetrics`. Every field is independently optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobMetricsUpdate {
    pub tool_call_count: Option<u64>,
    pub subagent_count: Option<u64>,
    pub total_tokens: Option<u64>,
    pub last_event_at_ms: Option<u64>,
    pub exit_forced: Option<bool>,
}

impl JobMetrics {
    /// Apply an incoming update. Counters take the monotonic maximum of the
    /// old and new value; `last_event_at_ms`/`exit_forced` are last-write-wins.
    ///
    /// REDESIGN (see DESIGN.md): the source spec takes last-write-wins for
    /// every field; this implementation follows the spec's own production
    /// recommendation (Design Note §9) of monotonic maxima for counters.
    pub fn merge(&mut self, update: &JobMetricsUpdate) {
        if let Some(v) = update.tool_call_count {
            self.tool_call_count = self.tool_call_count.max(v);
        }
        if let Some(v) = update.subagent_count {
            self.subagent_count = self.subagent_count.max(v);
        }
        if let Some(v) = update.total_tokens {
            self.total_tokens = self.total_tokens.max(v);
        }
        if let Some(v) = update.last_event_at_ms {
            self.last_event_at_ms = Some(v);
        }
        if let Some(v) = update.exit_forced {
            self.exit_forced = v;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub group_id: GroupId,
    pub job_type: String,
    pub harness: Harness,
    pub context: Option<String>,
    pub prompt: Option<String>,
    pub status: JobStatus,
    pub result: Option<String>,
    pub started_at_ms: Option<u64>,
    pub completed_at_ms: Option<u64>,
    pub metrics: JobMetrics,
    pub created_at_ms: u64,
    pub updated_at_ms: u64,
}

impl Job {
    pub fn new(
        group_id: GroupId,
        job_type: impl Into<String>,
        harness: Harness,
        context: Option<String>,
        now_ms: u64,
    ) -> Self {
        Self {
            id: JobId::new(),
            group_id,
            job_type: job_type.into(),
            harness,
            context,
            prompt: None,
            status: JobStatus::Pending,
            result: None,
            started_at_ms: None,
            completed_at_ms: None,
            metrics: JobMetrics::default(),
            created_at_ms: now_ms,
            updated_at_ms: now_ms,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// `pm` family (spec.md §3.4): the scheduler's PM-checkpoint job type.
    pub fn is_pm(&self) -> bool {
        self.job_type == "pm"
    }

    /// A job type is "review" iff it equals `"review"` or has the literal
    /// suffix `"review"` (spec.md §4.6.2).
    pub fn is_review(&self) -> bool {
        self.job_type == "review" || self.job_type.ends_with("review")
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
