// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

//! JobGroup: a parallel fan-out unit. All jobs within one group are
//! logically simultaneous; order inside a group is not observable.

use serde::{Deserialize, Serialize};

use crate::assignment::AssignmentId;

crate::define_id! {
    /// Unique identifier for a job group.
    pub struct GroupId("grp-");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupStatus {
    Pending,
    Running,
    Complete,
    Failed,
}

crate::simple_display! {
    GroupStatus {
        Pending => "pending",
        Running => "running",
        Complete => "complete",
        Failed => "failed",
    }
}

impl GroupStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GroupStatus::Complete | GroupStatus::Failed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobGroup {
    pub id: GroupId,
    pub assignment_id: AssignmentId,
    /// Forward pointer in the per-assignment singly-linked chain. `None` = tail.
    pub next_group_id: Option<GroupId>,
    pub status: GroupStatus,
    pub aggregated_result: Option<String>,
    pub created_at_ms: u64,
    pub updated_at_ms: u64,
}

impl JobGroup {
    pub fn new(assignment_id: AssignmentId, now_ms: u64) -> Self {
        Self {
            id: GroupId::new(),
            assignment_id,
            next_group_id: None,
            status: GroupStatus::Pending,
            aggregated_result: None,
            created_at_ms: now_ms,
            updated_at_ms: now_ms,
        }
    }
}
