// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

//! C3 Namespace Registry: CRUD over namespaces plus the denormalized
//! assignment-status counters (spec.md §4.2).

use cond_core::{AssignmentStatus, Namespace, NamespaceId};
use tracing::info;

use crate::{Engine, EngineError};

impl Engine {
    /// Idempotent on `name`: a second `create` with the same name returns
    /// the id of the namespace the first caller created.
    pub fn create_namespace(
        &self,
        password: &str,
        name: &str,
        description: Option<String>,
    ) -> Result<NamespaceId, EngineError> {
        self.authorize(password)?;
        let now = self.store.now_ms();
        let id = self.store.mutate(|state| {
            if let Some(existing) = state.get_namespace_by_name(name) {
                return existing.id;
            }
            let namespace = Namespace::new(name, description, now);
            state.insert_namespace(namespace)
        });
        info!(namespace_id = %id, %name, "namespace.create");
        Ok(id)
    }

    pub fn list_namespaces(&self, password: &str) -> Result<Vec<Namespace>, EngineError> {
        self.authorize(password)?;
        Ok(self.store.read(|state| state.list_namespaces().into_iter().cloned().collect()))
    }

    pub fn get_namespace(&self, password: &str, id: NamespaceId) -> Result<Namespace, EngineError> {
        self.authorize(password)?;
        self.store
            .read(|state| state.get_namespace(id).cloned())
            .ok_or_else(|| EngineError::not_found("namespace", id.to_string()))
    }

    pub fn get_namespace_by_name(&self, password: &str, name: &str) -> Result<Namespace, EngineError> {
        self.authorize(password)?;
        self.store
            .read(|state| state.get_namespace_by_name(name).cloned())
            .ok_or_else(|| EngineError::not_found("namespace", name))
    }

    pub fn update_namespace(
        &self,
        password: &str,
        id: NamespaceId,
        name: Option<String>,
        description: Option<Option<String>>,
    ) -> Result<Namespace, EngineError> {
        self.authorize(password)?;
        let now = self.store.now_ms();
        self.store.mutate(|state| {
            let namespace =
                state.get_namespace_mut(id).ok_or_else(|| EngineError::not_found("namespace", id.to_string()))?;
            if let Some(name) = name {
                namespace.name = name;
            }
            if let Some(description) = description {
                namespace.description = description;
            }
            namespace.updated_at_ms = now;
            Ok(namespace.clone())
        })
    }

    /// Removes the namespace and, for referential integrity, every
    /// assignment it owns (cascading through groups/jobs exactly as
    /// `remove_assignment` does). Not explicitly specified by spec.md's
    /// namespace CRUD contract; recorded as a DESIGN.md decision.
    pub fn remove_namespace(&self, password: &str, id: NamespaceId) -> Result<(), EngineError> {
        self.authorize(password)?;
        let assignment_ids: Vec<_> =
            self.store.read(|state| state.list_assignments_by_namespace(id).iter().map(|a| a.id).collect());
        for assignment_id in assignment_ids {
            self.remove_assignment(password, assignment_id)?;
        }
        self.store.mutate(|state| state.remove_namespace(id));
        Ok(())
    }

    /// Admin operation: recomputes `assignment_counts` for every namespace
    /// by scanning its assignments. Self-heals counter drift (spec.md §7).
    pub fn backfill_namespace_counts(&self, password: &str) -> Result<(), EngineError> {
        self.authorize(password)?;
        self.store.mutate(|state| {
            let namespace_ids: Vec<_> = state.list_namespaces().iter().map(|n| n.id).collect();
            for namespace_id in namespace_ids {
                let mut counts = cond_core::AssignmentCounts::default();
                for assignment in state.list_assignments_by_namespace(namespace_id) {
                    match assignment.status {
                        AssignmentStatus::Pending => counts.pending += 1,
                        AssignmentStatus::Active => counts.active += 1,
                        AssignmentStatus::Blocked => counts.blocked += 1,
                        AssignmentStatus::Complete => counts.complete += 1,
                    }
                }
                if let Some(namespace) = state.get_namespace_mut(namespace_id) {
                    namespace.assignment_counts = counts;
                }
            }
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "namespaces_tests.rs"]
mod tests;
