// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

//! Assignment: a stateful, named goal that owns a chain of job groups.

use serde::{Deserialize, Serialize};

use crate::group::GroupId;
use crate::namespace::NamespaceId;

crate::define_id! {
    /// Unique identifier for an assignment.
    pub struct AssignmentId("asn-");
}

/// Default priority for an assignment created without one (spec.md §3.2).
pub const DEFAULT_PRIORITY: i32 = 10;

/// Default priority for chat-triggered assignments (spec.md §3.2).
pub const CHAT_TRIGGERED_PRIORITY: i32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Pending,
    Active,
    Blocked,
    Complete,
}

crate::simple_display! {
    AssignmentStatus {
        Pending => "pending",
        Active => "active",
        Blocked => "blocked",
        Complete => "complete",
    }
}

impl AssignmentStatus {
    /// All variants, in a stable order — used to initialize/iterate
    /// `AssignmentCounts`.
    pub const ALL: [AssignmentStatus; 4] =
        [Self::Pending, Self::Active, Self::Blocked, Self::Complete];
}

/// Guardian-mode annotation on an assignment. No scheduling effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentStatus {
    Aligned,
    Uncertain,
    Misaligned,
}

crate::simple_display! {
    AlignmentStatus {
        Aligned => "aligned",
        Uncertain => "uncertain",
        Misaligned => "misaligned",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub namespace_id: NamespaceId,
    pub north_star: String,
    pub status: AssignmentStatus,
    pub independent: bool,
    pub priority: i32,
    pub artifacts: Option<String>,
    pub decisions: Option<String>,
    pub blocked_reason: Option<String>,
    pub alignment_status: Option<AlignmentStatus>,
    pub head_group_id: Option<GroupId>,
    pub created_at_ms: u64,
    pub updated_at_ms: u64,
}

impl Assignment {
    pub fn new(
        namespace_id: NamespaceId,
        north_star: impl Into<String>,
        independent: bool,
        priority: i32,
        now_ms: u64,
    ) -> Self {
        Self {
            id: AssignmentId::new(),
            namespace_id,
            north_star: north_star.into(),
            status: AssignmentStatus::Pending,
            independent,
            priority,
            artifacts: None,
            decisions: None,
            blocked_reason: None,
            alignment_status: None,
            head_group_id: None,
            created_at_ms: now_ms,
            updated_at_ms: now_ms,
        }
    }
}
