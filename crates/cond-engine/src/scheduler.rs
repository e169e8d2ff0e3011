// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

//! C6 Scheduler: a pure read over `cond-store` that decides which jobs
//! may run next (spec.md §4.6). Never mutates; mutation happens only
//! when the runner calls `start_job`.

use cond_core::{Assignment, AssignmentStatus, Harness, Job, JobGroup, JobStatus, NamespaceId};
use cond_store::StoreInner;

use crate::chain::walk_group_chain;
use crate::{Engine, EngineError};

/// One group's contribution to the scheduler's accumulators (spec.md
/// §4.6.2): `{jobType, harness, result, groupId, groupIndex}`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GroupResult {
    pub job_type: String,
    pub harness: Harness,
    pub result: Option<String>,
    pub group_id: cond_core::GroupId,
    pub group_index: u32,
}

/// A job the runner may dispatch right now, with the context it needs
/// (spec.md §4.6.3).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ReadyJob {
    pub job: Job,
    pub group: JobGroup,
    pub assignment: Assignment,
    /// Everything accumulated since the last `pm`-containing group.
    pub accumulated_results: Vec<GroupResult>,
    /// The completed non-pm group most recently stepped over.
    pub previous_non_pm_group_results: Vec<GroupResult>,
    /// The non-pm group immediately before the most recent review group.
    pub r1_group_results: Vec<GroupResult>,
}

/// A chat-job the runner may dispatch right now (spec.md §4.6.4); the
/// chat-job queue is unconditionally independent of assignment scheduling.
pub type ReadyChatJob = cond_core::ChatJob;

/// Denormalized snapshot of a namespace's queue depth, for dashboards
/// (spec.md §6.2 names `getQueueStatus` without further detail).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QueueStatus {
    pub ready_job_count: usize,
    pub ready_chat_job_count: usize,
    pub assignment_counts: cond_core::AssignmentCounts,
}

/// Live-subscription handle for `watchQueue` (spec.md Design Notes §9):
/// the source's reactive store pushes changes; here a per-namespace
/// `tokio::sync::watch` channel fires on every mutation that touches
/// `assignments`/`jobGroups`/`jobs`/`chatJobs` in the namespace. The
/// subscriber re-runs `get_ready_jobs` on each firing.
pub struct QueueWatch {
    receiver: tokio::sync::watch::Receiver<u64>,
}

impl QueueWatch {
    /// Waits for the next mutation affecting this namespace's queue.
    pub async fn changed(&mut self) -> Result<(), tokio::sync::watch::error::RecvError> {
        self.receiver.changed().await
    }
}

impl Engine {
    /// `getReadyJobs`: the eligibility gate (§4.6.1) plus the per-
    /// assignment chain walk (§4.6.2), returning every job across the
    /// namespace currently eligible to dispatch.
    pub fn get_ready_jobs(&self, password: &str, namespace_id: NamespaceId) -> Result<Vec<ReadyJob>, EngineError> {
        self.authorize(password)?;
        self.store.read(|state| {
            let pending = state.list_assignments_by_namespace_status(namespace_id, AssignmentStatus::Pending);
            let active = state.list_assignments_by_namespace_status(namespace_id, AssignmentStatus::Active);

            let mut candidates: Vec<&Assignment> = Vec::with_capacity(pending.len() + active.len());
            candidates.extend(pending);
            candidates.extend(active);

            let (independent, sequential): (Vec<&Assignment>, Vec<&Assignment>) =
                candidates.into_iter().partition(|a| a.independent);

            // The sequential winner is picked from the *full* {pending,
            // active} sequential set (spec.md §4.6.1 step 3): an `active`
            // sequential assignment must keep holding the namespace's one
            // slot even while its own group is `running`, otherwise the
            // slot frees up and a different sequential assignment starts
            // concurrently (P4). The running-group check below only
            // suppresses a job contribution, never a slot claim.
            let mut eligible: Vec<&Assignment> = independent;
            if let Some(winner) = pick_sequential_winner(&sequential) {
                eligible.push(winner);
            }

            // Step 2: a group is the unit of parallelism — an assignment
            // with any group currently `running` contributes no jobs (its
            // chain walk would also stop empty on that group, this just
            // skips the walk).
            eligible.retain(|assignment| !state.has_running_group(assignment.id));

            let mut ready = Vec::new();
            for assignment in eligible {
                ready.extend(walk_assignment_for_ready_jobs(state, assignment)?);
            }
            Ok(ready)
        })
    }

    /// `getReadyChatJobs`: index-scan `chatJobs` where `status = pending`
    /// in this namespace, oldest first. Unconditionally independent of
    /// assignment scheduling (spec.md §4.6.4).
    pub fn get_ready_chat_jobs(
        &self,
        password: &str,
        namespace_id: NamespaceId,
    ) -> Result<Vec<ReadyChatJob>, EngineError> {
        self.authorize(password)?;
        Ok(self
            .store
            .read(|state| state.list_chat_jobs_by_namespace_status(namespace_id, JobStatus::Pending))
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn get_queue_status(&self, password: &str, namespace_id: NamespaceId) -> Result<QueueStatus, EngineError> {
        self.authorize(password)?;
        let ready_job_count = self.get_ready_jobs(password, namespace_id)?.len();
        let ready_chat_job_count = self.get_ready_chat_jobs(password, namespace_id)?.len();
        let assignment_counts = self
            .store
            .read(|state| state.get_namespace(namespace_id).map(|n| n.assignment_counts))
            .ok_or_else(|| EngineError::not_found("namespace", namespace_id.to_string()))?;
        Ok(QueueStatus { ready_job_count, ready_chat_job_count, assignment_counts })
    }

    pub fn get_all_namespaces(&self, password: &str) -> Result<Vec<cond_core::Namespace>, EngineError> {
        self.list_namespaces(password)
    }

    pub fn get_all_assignments(
        &self,
        password: &str,
        namespace_id: NamespaceId,
    ) -> Result<Vec<Assignment>, EngineError> {
        self.list_assignments(password, namespace_id, None)
    }

    pub fn watch_queue(&self, password: &str, namespace_id: NamespaceId) -> Result<QueueWatch, EngineError> {
        self.authorize(password)?;
        Ok(QueueWatch { receiver: self.store.subscribe(namespace_id) })
    }
}

/// Among the (already running-group-filtered) sequential set, at most one
/// may contribute: the `active` one if there is one, else the lowest
/// `(priority, created_at)` pending one (spec.md §4.6.1 step 3, P9).
fn pick_sequential_winner<'a>(sequential: &[&'a Assignment]) -> Option<&'a Assignment> {
    if let Some(active) = sequential.iter().find(|a| a.status == AssignmentStatus::Active) {
        return Some(active);
    }
    sequential
        .iter()
        .filter(|a| a.status == AssignmentStatus::Pending)
        .min_by_key(|a| (a.priority, a.created_at_ms))
        .copied()
}

/// The per-assignment chain walk (spec.md §4.6.2): maintains
/// `accumulated_results`, `last_non_pm_group_results`, `r1_group_results`,
/// and a `group_index` counter that resets whenever we step past a pm
/// group. Stops at the first group that is ready or running; returns
/// empty if the walk reaches the tail.
fn walk_assignment_for_ready_jobs(state: &StoreInner, assignment: &Assignment) -> Result<Vec<ReadyJob>, EngineError> {
    let chain = walk_group_chain(state, assignment.head_group_id)?;

    let mut accumulated_results: Vec<GroupResult> = Vec::new();
    let mut last_non_pm_group_results: Vec<GroupResult> = Vec::new();
    let mut r1_group_results: Vec<GroupResult> = Vec::new();
    let mut group_index: u32 = 0;

    for group_id in chain {
        let group = state
            .get_group(group_id)
            .ok_or_else(|| EngineError::not_found("group", group_id.to_string()))?;
        let jobs = state.list_jobs_by_group(group_id);

        let pending_count = jobs.iter().filter(|j| j.status == JobStatus::Pending).count();
        let running_count = jobs.iter().filter(|j| j.status == JobStatus::Running).count();

        if pending_count >= 1 && running_count == 0 {
            return Ok(jobs
                .iter()
                .filter(|j| j.status == JobStatus::Pending)
                .map(|job| ReadyJob {
                    job: (*job).clone(),
                    group: group.clone(),
                    assignment: assignment.clone(),
                    accumulated_results: accumulated_results.clone(),
                    previous_non_pm_group_results: last_non_pm_group_results.clone(),
                    r1_group_results: r1_group_results.clone(),
                })
                .collect());
        }
        if running_count >= 1 {
            return Ok(Vec::new());
        }

        // All terminal: fold this group's contribution into the
        // accumulators, then advance.
        let this_group_results: Vec<GroupResult> = jobs
            .iter()
            .map(|job| GroupResult {
                job_type: job.job_type.clone(),
                harness: job.harness,
                result: job.result.clone(),
                group_id,
                group_index,
            })
            .collect();

        let has_pm = jobs.iter().any(|j| j.is_pm());
        let has_review = jobs.iter().any(|j| j.is_review());
        if has_pm {
            accumulated_results.clear();
            group_index = 0;
            // last_non_pm_group_results is deliberately left untouched.
        } else {
            if has_review {
                r1_group_results = last_non_pm_group_results.clone();
            }
            accumulated_results.extend(this_group_results.iter().cloned());
            last_non_pm_group_results = this_group_results;
            group_index += 1;
        }
    }

    Ok(Vec::new())
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
