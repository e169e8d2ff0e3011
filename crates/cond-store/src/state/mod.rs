// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

//! In-memory materialized state: the document collections and secondary
//! indexes named in spec.md §6.4, held behind one lock (see `StoreLock` in
//! the crate root) so every mutation is a single-writer transaction.

mod assignments;
mod chat_jobs;
mod chat_threads;
mod groups;
mod jobs;
mod namespaces;

use std::collections::{BTreeSet, HashMap};

use cond_core::{
    Assignment, AssignmentId, AssignmentStatus, ChatJob, ChatJobId, ChatMessage, ChatMessageId,
    ChatThread, ChatThreadId, GroupId, GroupStatus, Job, JobGroup, JobId, JobStatus, Namespace,
    NamespaceId,
};

/// Materialized, indexed state. Plain data + index-maintenance methods;
/// no locking lives here (the crate root wraps this in a mutex).
#[derive(Debug, Default)]
pub struct StoreInner {
    pub namespaces: HashMap<NamespaceId, Namespace>,
    pub namespaces_by_name: HashMap<String, NamespaceId>,

    pub assignments: HashMap<AssignmentId, Assignment>,
    pub assignments_by_namespace: HashMap<NamespaceId, BTreeSet<AssignmentId>>,
    pub assignments_by_namespace_status: HashMap<(NamespaceId, AssignmentStatus), BTreeSet<AssignmentId>>,

    pub groups: HashMap<GroupId, JobGroup>,
    pub groups_by_assignment: HashMap<AssignmentId, BTreeSet<GroupId>>,
    pub groups_by_assignment_status: HashMap<(AssignmentId, GroupStatus), BTreeSet<GroupId>>,

    pub jobs: HashMap<JobId, Job>,
    /// Insertion-ordered per group — `createGroup`'s `jobs[]` order is the
    /// "natural iteration order" the A/B/C aggregation labeling rule
    /// (spec.md §4.5) depends on.
    pub jobs_by_group: HashMap<GroupId, Vec<JobId>>,
    pub jobs_by_group_status: HashMap<(GroupId, JobStatus), BTreeSet<JobId>>,

    pub chat_threads: HashMap<ChatThreadId, ChatThread>,
    pub chat_threads_by_namespace: HashMap<NamespaceId, BTreeSet<ChatThreadId>>,
    pub chat_threads_by_assignment: HashMap<AssignmentId, ChatThreadId>,

    pub chat_messages: HashMap<ChatMessageId, ChatMessage>,
    /// Ordered by `created_at_ms` (messages are appended with a
    /// monotonically non-decreasing clock, so insertion order suffices).
    pub chat_messages_by_thread: HashMap<ChatThreadId, Vec<ChatMessageId>>,

    pub chat_jobs: HashMap<ChatJobId, ChatJob>,
    pub chat_jobs_by_namespace_status: HashMap<(NamespaceId, JobStatus), BTreeSet<ChatJobId>>,
    pub chat_jobs_by_thread_status: HashMap<(ChatThreadId, JobStatus), BTreeSet<ChatJobId>>,
}

impl StoreInner {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
