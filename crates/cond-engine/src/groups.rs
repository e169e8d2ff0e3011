// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

//! C5 Group/Job Service: group/job creation, splice-insertion,
//! start/complete/fail, and group-status derivation (spec.md §4.4-§4.5).

use std::collections::BTreeMap;

use cond_core::{
    AssignmentId, AssignmentStatus, CoreError, GroupId, GroupStatus, Harness, Job, JobGroup, JobId, JobMetricsUpdate,
    JobStatus,
};
use tracing::info;

use crate::{Engine, EngineError};

/// One job definition as passed to `create_group`/`insert_group_after`
/// (spec.md §4.4.1's `jobs[]`).
#[derive(Debug, Clone)]
pub struct NewJob {
    pub job_type: String,
    pub harness: Harness,
    pub context: Option<String>,
}

impl NewJob {
    pub fn new(job_type: impl Into<String>, harness: Harness, context: Option<String>) -> Self {
        Self { job_type: job_type.into(), harness, context }
    }
}

/// Result of `create_group`/`insert_group_after`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateGroupResult {
    pub group_id: GroupId,
    pub job_ids: Vec<JobId>,
}

/// A group with every job attached, as returned by `get_group_with_jobs`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct GroupWithJobs {
    pub group: JobGroup,
    pub jobs: Vec<Job>,
}

/// A job with its enclosing assignment, as returned by `get_with_assignment`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct JobWithAssignment {
    pub job: Job,
    pub assignment: cond_core::Assignment,
}

/// The central reconciliation rule (spec.md §4.5): after any member job of
/// a group becomes terminal, recompute the group's status. Pure over a
/// slice of jobs so idempotence (P6) is structural — calling this twice on
/// the same jobs always produces the same `(status, aggregated_result)`.
///
/// Returns `None` if the group is not yet all-terminal (leave as is).
pub fn derive_group_status(jobs: &[Job]) -> Option<(GroupStatus, String)> {
    if jobs.iter().any(|job| !job.is_terminal()) {
        return None;
    }
    let any_succeeded = jobs.iter().any(|job| job.status == JobStatus::Complete);
    let status = if any_succeeded { GroupStatus::Complete } else { GroupStatus::Failed };
    (status, build_aggregated_result(jobs)).into()
}

/// Partition jobs-with-non-null-result by `job_type`; a type with exactly
/// one job is labeled bare, a type with N > 1 jobs is labeled
/// `"<job_type> A"`, `"<job_type> B"`, ... in natural iteration order
/// (spec.md §4.5 step 4).
fn build_aggregated_result(jobs: &[Job]) -> String {
    let mut by_type: BTreeMap<&str, Vec<&Job>> = BTreeMap::new();
    let mut order: Vec<&str> = Vec::new();
    for job in jobs {
        if job.result.is_none() {
            continue;
        }
        if !by_type.contains_key(job.job_type.as_str()) {
            order.push(job.job_type.as_str());
        }
        by_type.entry(job.job_type.as_str()).or_default().push(job);
    }

    let mut sections = Vec::new();
    for job_type in order {
        let group = &by_type[job_type];
        if group.len() == 1 {
            let result = group[0].result.as_deref().unwrap_or_default();
            sections.push(format!("## {job_type}\n{result}"));
        } else {
            for (index, job) in group.iter().enumerate() {
                let letter = (b'A' + index as u8) as char;
                let result = job.result.as_deref().unwrap_or_default();
                sections.push(format!("## {job_type} {letter}\n{result}"));
            }
        }
    }
    sections.join("\n\n---\n\n")
}

impl Engine {
    /// `createGroup`: if the assignment has no `head_group_id`, set it to
    /// the new group. Otherwise the new group is *not* appended — callers
    /// must splice it in via `insert_group_after` (spec.md §4.4.1).
    pub fn create_group(
        &self,
        password: &str,
        assignment_id: AssignmentId,
        jobs: Vec<NewJob>,
    ) -> Result<CreateGroupResult, EngineError> {
        self.authorize(password)?;
        if jobs.is_empty() {
            return Err(CoreError::EmptyGroup.into());
        }
        let now = self.store.now_ms();
        let result = self.store.mutate(|state| {
            let assignment = state
                .get_assignment(assignment_id)
                .ok_or_else(|| EngineError::not_found("assignment", assignment_id.to_string()))?;

            let group = JobGroup::new(assignment_id, now);
            let group_id = state.insert_group(group);
            let job_ids: Vec<JobId> = jobs
                .into_iter()
                .map(|def| state.insert_job(Job::new(group_id, def.job_type, def.harness, def.context, now)))
                .collect();

            if assignment.head_group_id.is_none() {
                if let Some(assignment) = state.get_assignment_mut(assignment_id) {
                    assignment.head_group_id = Some(group_id);
                    assignment.updated_at_ms = now;
                }
            }
            Ok(CreateGroupResult { group_id, job_ids })
        })?;
        info!(assignment_id = %assignment_id, group_id = %result.group_id, "group.create");
        Ok(result)
    }

    /// `insertGroupAfter`: resolves the predecessor, creates the new group
    /// pointing at the predecessor's old `next_group_id`, then patches the
    /// predecessor — in that order, so a reader observing a partial state
    /// sees the pre-insertion chain, never a loop (spec.md §4.4.1).
    pub fn insert_group_after(
        &self,
        password: &str,
        after_group_id: GroupId,
        jobs: Vec<NewJob>,
    ) -> Result<CreateGroupResult, EngineError> {
        self.authorize(password)?;
        if jobs.is_empty() {
            return Err(CoreError::EmptyGroup.into());
        }
        let now = self.store.now_ms();
        let result = self.store.mutate(|state| {
            let predecessor = state
                .get_group(after_group_id)
                .ok_or_else(|| EngineError::not_found("group", after_group_id.to_string()))?;
            let assignment_id = predecessor.assignment_id;
            let next_after = predecessor.next_group_id;

            let mut group = JobGroup::new(assignment_id, now);
            group.next_group_id = next_after;
            let group_id = state.insert_group(group);
            let job_ids: Vec<JobId> = jobs
                .into_iter()
                .map(|def| state.insert_job(Job::new(group_id, def.job_type, def.harness, def.context, now)))
                .collect();

            if let Some(predecessor) = state.get_group_mut(after_group_id) {
                predecessor.next_group_id = Some(group_id);
                predecessor.updated_at_ms = now;
            }
            Ok(CreateGroupResult { group_id, job_ids })
        })?;
        info!(after_group_id = %after_group_id, group_id = %result.group_id, "group.insert_after");
        Ok(result)
    }

    pub fn get_group(&self, password: &str, id: GroupId) -> Result<JobGroup, EngineError> {
        self.authorize(password)?;
        self.store.read(|state| state.get_group(id).cloned()).ok_or_else(|| EngineError::not_found("group", id.to_string()))
    }

    pub fn get_group_with_jobs(&self, password: &str, id: GroupId) -> Result<GroupWithJobs, EngineError> {
        self.authorize(password)?;
        self.store.read(|state| {
            let group = state.get_group(id).ok_or_else(|| EngineError::not_found("group", id.to_string()))?;
            let jobs = state.list_jobs_by_group(id).into_iter().cloned().collect();
            Ok(GroupWithJobs { group: group.clone(), jobs })
        })
    }

    pub fn list_groups(&self, password: &str, assignment_id: AssignmentId) -> Result<Vec<JobGroup>, EngineError> {
        self.authorize(password)?;
        Ok(self.store.read(|state| state.list_groups_by_assignment(assignment_id).into_iter().cloned().collect()))
    }

    pub fn get_job(&self, password: &str, id: JobId) -> Result<Job, EngineError> {
        self.authorize(password)?;
        self.store.read(|state| state.get_job(id).cloned()).ok_or_else(|| EngineError::not_found("job", id.to_string()))
    }

    pub fn get_job_with_assignment(&self, password: &str, id: JobId) -> Result<JobWithAssignment, EngineError> {
        self.authorize(password)?;
        self.store.read(|state| {
            let job = state.get_job(id).ok_or_else(|| EngineError::not_found("job", id.to_string()))?;
            let group = state
                .get_group(job.group_id)
                .ok_or_else(|| EngineError::not_found("group", job.group_id.to_string()))?;
            let assignment = state
                .get_assignment(group.assignment_id)
                .ok_or_else(|| EngineError::not_found("assignment", group.assignment_id.to_string()))?;
            Ok(JobWithAssignment { job: job.clone(), assignment: assignment.clone() })
        })
    }

    pub fn list_jobs(
        &self,
        password: &str,
        group_id: Option<GroupId>,
        status: Option<JobStatus>,
    ) -> Result<Vec<Job>, EngineError> {
        self.authorize(password)?;
        self.store.read(|state| {
            let Some(group_id) = group_id else {
                return Err(EngineError::Core(CoreError::IllegalTransition(
                    "listing jobs without a group_id is not indexed".into(),
                )));
            };
            let jobs = state.list_jobs_by_group(group_id);
            Ok(match status {
                Some(status) => jobs.into_iter().filter(|j| j.status == status).cloned().collect(),
                None => jobs.into_iter().cloned().collect(),
            })
        })
    }

    /// `startJob`: requires `pending`, patches job to `running`, patches
    /// the group to `running`, and flips the owning assignment to
    /// `active` if it was not already (spec.md §4.4.2).
    pub fn start_job(&self, password: &str, id: JobId, prompt: Option<String>) -> Result<Job, EngineError> {
        self.authorize(password)?;
        let now = self.store.now_ms();
        let job = self.store.mutate(|state| {
            let job = state.get_job(id).ok_or_else(|| EngineError::not_found("job", id.to_string()))?;
            if job.status != JobStatus::Pending {
                return Err(CoreError::IllegalTransition(format!(
                    "job {id} cannot start from status {}",
                    job.status
                ))
                .into());
            }
            let group_id = job.group_id;

            state.reindex_job_status(id, group_id, JobStatus::Pending, JobStatus::Running);
            let job = state.get_job_mut(id).ok_or_else(|| EngineError::not_found("job", id.to_string()))?;
            job.status = JobStatus::Running;
            job.started_at_ms = Some(now);
            job.prompt = prompt;
            job.updated_at_ms = now;
            let job = job.clone();

            let assignment_id = state
                .get_group(group_id)
                .ok_or_else(|| EngineError::not_found("group", group_id.to_string()))?
                .assignment_id;
            if let Some(group) = state.get_group_mut(group_id) {
                group.status = GroupStatus::Running;
                group.updated_at_ms = now;
            }

            let assignment = state
                .get_assignment(assignment_id)
                .ok_or_else(|| EngineError::not_found("assignment", assignment_id.to_string()))?;
            if assignment.status != AssignmentStatus::Active {
                let namespace_id = assignment.namespace_id;
                let old_status = assignment.status;
                state.reindex_assignment_status(assignment_id, namespace_id, old_status, AssignmentStatus::Active);
                if let Some(namespace) = state.get_namespace_mut(namespace_id) {
                    namespace.assignment_counts.transition(old_status, AssignmentStatus::Active);
                    namespace.updated_at_ms = now;
                }
                if let Some(assignment) = state.get_assignment_mut(assignment_id) {
                    assignment.status = AssignmentStatus::Active;
                    assignment.updated_at_ms = now;
                }
            }
            Ok(job)
        })?;
        self.notify_job_namespace(id);
        info!(job_id = %id, "job.start");
        Ok(job)
    }

    pub fn complete_job(
        &self,
        password: &str,
        id: JobId,
        result: Option<String>,
        metrics: Option<JobMetricsUpdate>,
    ) -> Result<Job, EngineError> {
        let job = self.finish_job(password, id, JobStatus::Complete, result, metrics)?;
        info!(job_id = %id, "job.complete");
        Ok(job)
    }

    pub fn fail_job(
        &self,
        password: &str,
        id: JobId,
        result: Option<String>,
        metrics: Option<JobMetricsUpdate>,
    ) -> Result<Job, EngineError> {
        let job = self.finish_job(password, id, JobStatus::Failed, result, metrics)?;
        info!(job_id = %id, "job.fail");
        Ok(job)
    }

    /// Shared `complete`/`fail` path: requires `running` (admin cancel from
    /// `pending` is also permitted, per spec.md §4.4.2's implementor note),
    /// then runs group-status derivation (spec.md §4.5).
    fn finish_job(
        &self,
        password: &str,
        id: JobId,
        new_status: JobStatus,
        result: Option<String>,
        metrics: Option<JobMetricsUpdate>,
    ) -> Result<Job, EngineError> {
        self.authorize(password)?;
        let now = self.store.now_ms();
        let job = self.store.mutate(|state| {
            let job = state.get_job(id).ok_or_else(|| EngineError::not_found("job", id.to_string()))?;
            let admin_cancel = new_status == JobStatus::Failed && job.status == JobStatus::Pending;
            if job.status != JobStatus::Running && !admin_cancel {
                return Err(CoreError::IllegalTransition(format!(
                    "job {id} cannot finish from status {}",
                    job.status
                ))
                .into());
            }
            let group_id = job.group_id;
            let old_status = job.status;

            state.reindex_job_status(id, group_id, old_status, new_status);
            let job = state.get_job_mut(id).ok_or_else(|| EngineError::not_found("job", id.to_string()))?;
            job.status = new_status;
            job.completed_at_ms = Some(now);
            job.result = result;
            if let Some(metrics) = metrics {
                job.metrics.merge(&metrics);
            }
            job.updated_at_ms = now;
            let job = job.clone();

            derive_and_persist_group_status(state, group_id, now);
            Ok(job)
        })?;
        self.notify_job_namespace(id);
        Ok(job)
    }

    /// Non-status telemetry update; always allowed regardless of job
    /// status (spec.md §4.4.2).
    pub fn update_job_metrics(&self, password: &str, id: JobId, metrics: JobMetricsUpdate) -> Result<Job, EngineError> {
        self.authorize(password)?;
        let now = self.store.now_ms();
        self.store.mutate(|state| {
            let job = state.get_job_mut(id).ok_or_else(|| EngineError::not_found("job", id.to_string()))?;
            job.metrics.merge(&metrics);
            job.updated_at_ms = now;
            Ok(job.clone())
        })
    }

    fn notify_job_namespace(&self, job_id: JobId) {
        let namespace_id = self.store.read(|state| {
            let job = state.get_job(job_id)?;
            let group = state.get_group(job.group_id)?;
            let assignment = state.get_assignment(group.assignment_id)?;
            Some(assignment.namespace_id)
        });
        if let Some(namespace_id) = namespace_id {
            self.store.notify(namespace_id);
        }
    }
}

/// Re-derive and persist a group's status (spec.md §4.5), called from
/// both `complete_job` and `fail_job` after the triggering job's own
/// patch has already landed.
fn derive_and_persist_group_status(state: &mut cond_store::StoreInner, group_id: GroupId, now: u64) {
    let jobs: Vec<Job> = state.list_jobs_by_group(group_id).into_iter().cloned().collect();
    let Some((status, aggregated_result)) = derive_group_status(&jobs) else {
        return;
    };
    let Some(group) = state.get_group(group_id) else {
        return;
    };
    let assignment_id = group.assignment_id;
    let old_status = group.status;
    state.reindex_group_status(group_id, assignment_id, old_status, status);
    if let Some(group) = state.get_group_mut(group_id) {
        group.status = status;
        group.aggregated_result = Some(aggregated_result);
        group.updated_at_ms = now;
    }
}

#[cfg(test)]
#[path = "groups_tests.rs"]
mod tests;
