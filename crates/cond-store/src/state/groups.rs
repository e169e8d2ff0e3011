// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

use cond_core::{AssignmentId, GroupId, GroupStatus, JobGroup};

use super::StoreInner;

impl StoreInner {
    pub fn insert_group(&mut self, group: JobGroup) -> GroupId {
        let id = group.id;
        self.groups_by_assignment.entry(group.assignment_id).or_default().insert(id);
        self.groups_by_assignment_status.entry((group.assignment_id, group.status)).or_default().insert(id);
        self.groups.insert(id, group);
        id
    }

    pub fn get_group(&self, id: GroupId) -> Option<&JobGroup> {
        self.groups.get(&id)
    }

    pub fn get_group_mut(&mut self, id: GroupId) -> Option<&mut JobGroup> {
        self.groups.get_mut(&id)
    }

    pub fn reindex_group_status(
        &mut self,
        id: GroupId,
        assignment_id: AssignmentId,
        old: GroupStatus,
        new: GroupStatus,
    ) {
        if old == new {
            return;
        }
        if let Some(set) = self.groups_by_assignment_status.get_mut(&(assignment_id, old)) {
            set.remove(&id);
        }
        self.groups_by_assignment_status.entry((assignment_id, new)).or_default().insert(id);
    }

    /// Whether any group of `assignment_id` is currently `running`
    /// (scheduler eligibility gate, spec.md §4.6.1 step 2).
    pub fn has_running_group(&self, assignment_id: AssignmentId) -> bool {
        self.groups_by_assignment_status
            .get(&(assignment_id, GroupStatus::Running))
            .is_some_and(|set| !set.is_empty())
    }

    pub fn list_groups_by_assignment(&self, assignment_id: AssignmentId) -> Vec<&JobGroup> {
        self.groups_by_assignment
            .get(&assignment_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.groups.get(id))
            .collect()
    }

    /// Remove a group and its jobs (cascade, used by `Assignment::remove`).
    pub fn remove_group_cascade(&mut self, id: GroupId) -> (Option<JobGroup>, usize) {
        let group = self.groups.remove(&id);
        if let Some(group) = &group {
            if let Some(set) = self.groups_by_assignment.get_mut(&group.assignment_id) {
                set.remove(&id);
            }
            if let Some(set) = self.groups_by_assignment_status.get_mut(&(group.assignment_id, group.status)) {
                set.remove(&id);
            }
        }
        let job_ids: Vec<_> = self.jobs_by_group.remove(&id).into_iter().flatten().collect();
        let mut removed = 0;
        for job_id in job_ids {
            if let Some(job) = self.jobs.remove(&job_id) {
                if let Some(set) = self.jobs_by_group_status.get_mut(&(job.group_id, job.status)) {
                    set.remove(&job_id);
                }
                removed += 1;
            }
        }
        (group, removed)
    }
}
