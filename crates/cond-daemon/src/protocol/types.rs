// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

//! Wire-level helper types shared by `Request`/`Response` variants.

use cond_core::{AlignmentStatus, Harness};
use serde::{Deserialize, Serialize};

/// A nullable field's update, distinguishing "leave unchanged" from
/// "clear to null" from "set to this value" over JSON — `Option<Option<T>>`
/// does not round-trip that distinction through serde without a helper,
/// so the wire layer spells it out as a tagged enum instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum FieldPatch<T> {
    #[default]
    Keep,
    Clear,
    Set(T),
}

impl<T> FieldPatch<T> {
    /// Lower into the `Option<Option<T>>` shape `cond-engine`'s
    /// `AssignmentUpdate`/`update_namespace` expect: `None` = unchanged.
    pub fn into_patch(self) -> Option<Option<T>> {
        match self {
            FieldPatch::Keep => None,
            FieldPatch::Clear => Some(None),
            FieldPatch::Set(v) => Some(Some(v)),
        }
    }
}

/// Wire form of one job definition passed to `createGroup`/`insertGroupAfter`
/// (spec.md §4.4.1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewJobWire {
    pub job_type: String,
    pub harness: Harness,
    #[serde(default)]
    pub context: Option<String>,
}

impl From<NewJobWire> for cond_engine::groups::NewJob {
    fn from(w: NewJobWire) -> Self {
        cond_engine::groups::NewJob::new(w.job_type, w.harness, w.context)
    }
}

/// Wire form of `update_assignment`'s patch (spec.md §4.3).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentPatchWire {
    #[serde(default)]
    pub north_star: Option<String>,
    #[serde(default)]
    pub independent: Option<bool>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub artifacts: FieldPatch<String>,
    #[serde(default)]
    pub decisions: FieldPatch<String>,
    #[serde(default)]
    pub blocked_reason: FieldPatch<String>,
    #[serde(default)]
    pub alignment_status: FieldPatch<AlignmentStatus>,
    #[serde(default)]
    pub status: Option<cond_core::AssignmentStatus>,
}

impl From<AssignmentPatchWire> for cond_engine::assignments::AssignmentUpdate {
    fn from(w: AssignmentPatchWire) -> Self {
        cond_engine::assignments::AssignmentUpdate {
            north_star: w.north_star,
            independent: w.independent,
            priority: w.priority,
            artifacts: w.artifacts.into_patch(),
            decisions: w.decisions.into_patch(),
            blocked_reason: w.blocked_reason.into_patch(),
            alignment_status: w.alignment_status.into_patch(),
            status: w.status,
        }
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
