// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

//! C4 Assignment Service: lifecycle, chain reads, cascade delete
//! (spec.md §4.3).

use cond_core::{AlignmentStatus, Assignment, AssignmentId, AssignmentStatus, JobGroup, NamespaceId};
use tracing::info;

use crate::chain::walk_group_chain;
use crate::{Engine, EngineError};

/// Partial patch for `update_assignment`. Every field is independently
/// optional; nullable fields use `Option<Option<T>>` so "leave unchanged"
/// and "set to null" are distinguishable.
#[derive(Debug, Clone, Default)]
pub struct AssignmentUpdate {
    pub north_star: Option<String>,
    pub independent: Option<bool>,
    pub priority: Option<i32>,
    pub artifacts: Option<Option<String>>,
    pub decisions: Option<Option<String>>,
    pub blocked_reason: Option<Option<String>>,
    pub alignment_status: Option<Option<AlignmentStatus>>,
    pub status: Option<AssignmentStatus>,
}

/// Result of cascading an assignment delete (spec.md §4.3).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RemoveAssignmentResult {
    pub groups_deleted: usize,
    pub jobs_deleted: usize,
}

/// An assignment with every group in its chain and every job per group
/// attached, as returned by `getWithGroups`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AssignmentWithGroups {
    pub assignment: Assignment,
    pub groups: Vec<(JobGroup, Vec<cond_core::Job>)>,
}

impl Engine {
    pub fn create_assignment(
        &self,
        password: &str,
        namespace_id: NamespaceId,
        north_star: &str,
        independent: bool,
        priority: Option<i32>,
    ) -> Result<AssignmentId, EngineError> {
        self.authorize(password)?;
        let now = self.store.now_ms();
        let priority = priority.unwrap_or(cond_core::assignment::DEFAULT_PRIORITY);
        let id = self.store.mutate(|state| {
            if state.get_namespace(namespace_id).is_none() {
                return Err(EngineError::not_found("namespace", namespace_id.to_string()));
            }
            let assignment = Assignment::new(namespace_id, north_star, independent, priority, now);
            let id = assignment.id;
            state.insert_assignment(assignment);
            if let Some(namespace) = state.get_namespace_mut(namespace_id) {
                namespace.assignment_counts.increment(AssignmentStatus::Pending);
                namespace.updated_at_ms = now;
            }
            Ok(id)
        })?;
        info!(assignment_id = %id, %namespace_id, "assignment.create");
        Ok(id)
    }

    pub fn update_assignment(
        &self,
        password: &str,
        id: AssignmentId,
        patch: AssignmentUpdate,
    ) -> Result<Assignment, EngineError> {
        self.authorize(password)?;
        let now = self.store.now_ms();
        self.store.mutate(|state| {
            let namespace_id = state
                .get_assignment(id)
                .ok_or_else(|| EngineError::not_found("assignment", id.to_string()))?
                .namespace_id;
            let old_status =
                state.get_assignment(id).ok_or_else(|| EngineError::not_found("assignment", id.to_string()))?.status;

            if let Some(new_status) = patch.status {
                if new_status != old_status {
                    state.reindex_assignment_status(id, namespace_id, old_status, new_status);
                    if let Some(namespace) = state.get_namespace_mut(namespace_id) {
                        namespace.assignment_counts.transition(old_status, new_status);
                        namespace.updated_at_ms = now;
                    }
                }
            }

            let assignment =
                state.get_assignment_mut(id).ok_or_else(|| EngineError::not_found("assignment", id.to_string()))?;
            if let Some(v) = patch.north_star {
                assignment.north_star = v;
            }
            if let Some(v) = patch.independent {
                assignment.independent = v;
            }
            if let Some(v) = patch.priority {
                assignment.priority = v;
            }
            if let Some(v) = patch.artifacts {
                assignment.artifacts = v;
            }
            if let Some(v) = patch.decisions {
                assignment.decisions = v;
            }
            if let Some(v) = patch.blocked_reason {
                assignment.blocked_reason = v;
            }
            if let Some(v) = patch.alignment_status {
                assignment.alignment_status = v;
            }
            if let Some(v) = patch.status {
                assignment.status = v;
            }
            assignment.updated_at_ms = now;
            Ok(assignment.clone())
        })
    }

    pub fn complete_assignment(&self, password: &str, id: AssignmentId) -> Result<Assignment, EngineError> {
        self.update_assignment(
            password,
            id,
            AssignmentUpdate { status: Some(AssignmentStatus::Complete), ..Default::default() },
        )
    }

    pub fn block_assignment(
        &self,
        password: &str,
        id: AssignmentId,
        reason: impl Into<String>,
    ) -> Result<Assignment, EngineError> {
        self.update_assignment(
            password,
            id,
            AssignmentUpdate {
                status: Some(AssignmentStatus::Blocked),
                blocked_reason: Some(Some(reason.into())),
                ..Default::default()
            },
        )
    }

    /// Forces `status -> active`, not back to `pending` (spec.md §4.3).
    pub fn unblock_assignment(&self, password: &str, id: AssignmentId) -> Result<Assignment, EngineError> {
        self.update_assignment(
            password,
            id,
            AssignmentUpdate {
                status: Some(AssignmentStatus::Active),
                blocked_reason: Some(None),
                ..Default::default()
            },
        )
    }

    pub fn get_assignment(&self, password: &str, id: AssignmentId) -> Result<Assignment, EngineError> {
        self.authorize(password)?;
        self.store
            .read(|state| state.get_assignment(id).cloned())
            .ok_or_else(|| EngineError::not_found("assignment", id.to_string()))
    }

    pub fn list_assignments(
        &self,
        password: &str,
        namespace_id: NamespaceId,
        status: Option<AssignmentStatus>,
    ) -> Result<Vec<Assignment>, EngineError> {
        self.authorize(password)?;
        Ok(self.store.read(|state| match status {
            Some(status) => {
                state.list_assignments_by_namespace_status(namespace_id, status).into_iter().cloned().collect()
            }
            None => state.list_assignments_by_namespace(namespace_id).into_iter().cloned().collect(),
        }))
    }

    /// Cheap chain walk: groups only, no jobs attached.
    pub fn get_group_chain(&self, password: &str, id: AssignmentId) -> Result<Vec<JobGroup>, EngineError> {
        self.authorize(password)?;
        self.store.read(|state| {
            let assignment =
                state.get_assignment(id).ok_or_else(|| EngineError::not_found("assignment", id.to_string()))?;
            let group_ids = walk_group_chain(state, assignment.head_group_id)?;
            Ok(group_ids.into_iter().filter_map(|gid| state.get_group(gid).cloned()).collect())
        })
    }

    /// Full chain walk with every job attached per group.
    pub fn get_assignment_with_groups(
        &self,
        password: &str,
        id: AssignmentId,
    ) -> Result<AssignmentWithGroups, EngineError> {
        self.authorize(password)?;
        self.store.read(|state| {
            let assignment =
                state.get_assignment(id).ok_or_else(|| EngineError::not_found("assignment", id.to_string()))?;
            let group_ids = walk_group_chain(state, assignment.head_group_id)?;
            let groups = group_ids
                .into_iter()
                .filter_map(|gid| {
                    let group = state.get_group(gid)?.clone();
                    let jobs = state.list_jobs_by_group(gid).into_iter().cloned().collect();
                    Some((group, jobs))
                })
                .collect();
            Ok(AssignmentWithGroups { assignment: assignment.clone(), groups })
        })
    }

    /// Cascade-deletes every group in the assignment (and every job in
    /// each group), clears any chat-thread back-reference, and adjusts the
    /// namespace's `assignment_counts`.
    pub fn remove_assignment(&self, password: &str, id: AssignmentId) -> Result<RemoveAssignmentResult, EngineError> {
        self.authorize(password)?;
        let now = self.store.now_ms();
        self.store.mutate(|state| {
            let assignment =
                state.remove_assignment(id).ok_or_else(|| EngineError::not_found("assignment", id.to_string()))?;

            let group_ids: Vec<_> = state.list_groups_by_assignment(id).iter().map(|g| g.id).collect();
            let mut result = RemoveAssignmentResult::default();
            for group_id in group_ids {
                let (_, jobs_deleted) = state.remove_group_cascade(group_id);
                result.groups_deleted += 1;
                result.jobs_deleted += jobs_deleted;
            }

            state.unlink_chat_threads_for_assignment(id);

            if let Some(namespace) = state.get_namespace_mut(assignment.namespace_id) {
                namespace.assignment_counts.decrement(assignment.status);
                namespace.updated_at_ms = now;
            }
            Ok(result)
        })
    }
}

#[cfg(test)]
#[path = "assignments_tests.rs"]
mod tests;
