// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

//! Namespace: the top-level tenant boundary. All scheduling decisions are
//! scoped to one namespace.

use serde::{Deserialize, Serialize};

use crate::assignment::AssignmentStatus;

crate::define_id! {
    /// Unique identifier for a namespace.
    pub struct NamespaceId("nsp-");
}

/// Denormalized count of assignments per status within a namespace.
///
/// Invariant (spec.md §3.1): `assignment_counts[s]` always equals the
/// number of assignments in the namespace with `status == s`. Every status
/// transition must adjust exactly two counters atomically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentCounts {
    pub pending: u32,
    pub active: u32,
    pub blocked: u32,
    pub complete: u32,
}

impl AssignmentCounts {
    pub fn get(&self, status: AssignmentStatus) -> u32 {
        match status {
            AssignmentStatus::Pending => self.pending,
            AssignmentStatus::Active => self.active,
            AssignmentStatus::Blocked => self.blocked,
            AssignmentStatus::Complete => self.complete,
        }
    }

    fn get_mut(&mut self, status: AssignmentStatus) -> &mut u32 {
        match status {
            AssignmentStatus::Pending => &mut self.pending,
            AssignmentStatus::Active => &mut self.active,
            AssignmentStatus::Blocked => &mut self.blocked,
            AssignmentStatus::Complete => &mut self.complete,
        }
    }

    pub fn increment(&mut self, status: AssignmentStatus) {
        *self.get_mut(status) += 1;
    }

    pub fn decrement(&mut self, status: AssignmentStatus) {
        let slot = self.get_mut(status);
        *slot = slot.saturating_sub(1);
    }

    /// Move one assignment from `old` to `new` (no-op if `old == new`).
    pub fn transition(&mut self, old: AssignmentStatus, new: AssignmentStatus) {
        if old == new {
            return;
        }
        self.decrement(old);
        self.increment(new);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Namespace {
    pub id: NamespaceId,
    pub name: String,
    pub description: Option<String>,
    pub assignment_counts: AssignmentCounts,
    pub created_at_ms: u64,
    pub updated_at_ms: u64,
}

impl Namespace {
    pub fn new(name: impl Into<String>, description: Option<String>, now_ms: u64) -> Self {
        Self {
            id: NamespaceId::new(),
            name: name.into(),
            description,
            assignment_counts: AssignmentCounts::default(),
            created_at_ms: now_ms,
            updated_at_ms: now_ms,
        }
    }
}

#[cfg(test)]
#[path = "namespace_tests.rs"]
mod tests;
