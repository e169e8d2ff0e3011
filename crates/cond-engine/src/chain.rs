// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

//! Shared group-chain walk used by the Assignment Service (`getGroupChain`,
//! `getWithGroups`, cascade delete) and the Scheduler (the per-assignment
//! chain walk of spec.md §4.6.2).

use std::collections::HashSet;

use cond_core::{CoreError, GroupId};
use cond_store::StoreInner;

/// Implementors SHOULD bound chain depth (spec.md §4.3); 10,000 groups is
/// the number the spec names explicitly.
pub const MAX_CHAIN_DEPTH: usize = 10_000;

/// Walk `head` via `next_group_id`, returning group ids in chain order.
/// Fails with `ChainCorrupt` on a cycle (visited-set check) or a dangling
/// pointer (a `next_group_id` that does not resolve to a stored group).
pub fn walk_group_chain(state: &StoreInner, head: Option<GroupId>) -> Result<Vec<GroupId>, CoreError> {
    let mut ids = Vec::new();
    let mut visited = HashSet::new();
    let mut cursor = head;
    while let Some(group_id) = cursor {
        if !visited.insert(group_id) {
            return Err(CoreError::ChainCorrupt(format!("cycle detected at group {group_id}")));
        }
        if ids.len() >= MAX_CHAIN_DEPTH {
            return Err(CoreError::ChainCorrupt(format!("chain exceeds {MAX_CHAIN_DEPTH} groups")));
        }
        let group = state
            .get_group(group_id)
            .ok_or_else(|| CoreError::ChainCorrupt(format!("dangling next_group_id {group_id}")))?;
        ids.push(group_id);
        cursor = group.next_group_id;
    }
    Ok(ids)
}

#[cfg(test)]
#[path = "chain_tests.rs"]
mod tests;
