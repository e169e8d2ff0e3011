// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

use cond_core::{Assignment, AssignmentId, AssignmentStatus, NamespaceId};

use super::StoreInner;

impl StoreInner {
    pub fn insert_assignment(&mut self, assignment: Assignment) -> AssignmentId {
        let id = assignment.id;
        self.assignments_by_namespace.entry(assignment.namespace_id).or_default().insert(id);
        self.assignments_by_namespace_status
            .entry((assignment.namespace_id, assignment.status))
            .or_default()
            .insert(id);
        self.assignments.insert(id, assignment);
        id
    }

    pub fn get_assignment(&self, id: AssignmentId) -> Option<&Assignment> {
        self.assignments.get(&id)
    }

    pub fn get_assignment_mut(&mut self, id: AssignmentId) -> Option<&mut Assignment> {
        self.assignments.get_mut(&id)
    }

    /// Re-index an assignment after its `status` field was mutated in
    /// place. Caller is responsible for actually changing `.status`;
    /// this only repairs the `by_namespace_status` index.
    pub fn reindex_assignment_status(
        &mut self,
        id: AssignmentId,
        namespace_id: NamespaceId,
        old: AssignmentStatus,
        new: AssignmentStatus,
    ) {
        if old == new {
            return;
        }
        if let Some(set) = self.assignments_by_namespace_status.get_mut(&(namespace_id, old)) {
            set.remove(&id);
        }
        self.assignments_by_namespace_status.entry((namespace_id, new)).or_default().insert(id);
    }

    pub fn list_assignments_by_namespace(&self, namespace_id: NamespaceId) -> Vec<&Assignment> {
        self.assignments_by_namespace
            .get(&namespace_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.assignments.get(id))
            .collect()
    }

    pub fn list_assignments_by_namespace_status(
        &self,
        namespace_id: NamespaceId,
        status: AssignmentStatus,
    ) -> Vec<&Assignment> {
        self.assignments_by_namespace_status
            .get(&(namespace_id, status))
            .into_iter()
            .flatten()
            .filter_map(|id| self.assignments.get(id))
            .collect()
    }

    pub fn remove_assignment(&mut self, id: AssignmentId) -> Option<Assignment> {
        let assignment = self.assignments.remove(&id)?;
        if let Some(set) = self.assignments_by_namespace.get_mut(&assignment.namespace_id) {
            set.remove(&id);
        }
        if let Some(set) =
            self.assignments_by_namespace_status.get_mut(&(assignment.namespace_id, assignment.status))
        {
            set.remove(&id);
        }
        Some(assignment)
    }
}
