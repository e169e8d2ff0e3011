// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

use cond_core::{ChatJob, ChatJobId, ChatThreadId, JobStatus, NamespaceId};

use super::StoreInner;

impl StoreInner {
    pub fn insert_chat_job(&mut self, chat_job: ChatJob) -> ChatJobId {
        let id = chat_job.id;
        self.chat_jobs_by_namespace_status.entry((chat_job.namespace_id, chat_job.status)).or_default().insert(id);
        self.chat_jobs_by_thread_status.entry((chat_job.thread_id, chat_job.status)).or_default().insert(id);
        self.chat_jobs.insert(id, chat_job);
        id
    }

    pub fn get_chat_job(&self, id: ChatJobId) -> Option<&ChatJob> {
        self.chat_jobs.get(&id)
    }

    pub fn get_chat_job_mut(&mut self, id: ChatJobId) -> Option<&mut ChatJob> {
        self.chat_jobs.get_mut(&id)
    }

    pub fn reindex_chat_job_status(
        &mut self,
        id: ChatJobId,
        namespace_id: NamespaceId,
        thread_id: ChatThreadId,
        old: JobStatus,
        new: JobStatus,
    ) {
        if old == new {
            return;
        }
        if let Some(set) = self.chat_jobs_by_namespace_status.get_mut(&(namespace_id, old)) {
            set.remove(&id);
        }
        self.chat_jobs_by_namespace_status.entry((namespace_id, new)).or_default().insert(id);

        if let Some(set) = self.chat_jobs_by_thread_status.get_mut(&(thread_id, old)) {
            set.remove(&id);
        }
        self.chat_jobs_by_thread_status.entry((thread_id, new)).or_default().insert(id);
    }

    /// `getReadyChatJobs`: pending chat-jobs in a namespace, oldest first
    /// (spec.md §4.6.4). Always index-scanned via `(namespace, status)`.
    pub fn list_chat_jobs_by_namespace_status(
        &self,
        namespace_id: NamespaceId,
        status: JobStatus,
    ) -> Vec<&ChatJob> {
        let mut jobs: Vec<&ChatJob> = self
            .chat_jobs_by_namespace_status
            .get(&(namespace_id, status))
            .into_iter()
            .flatten()
            .filter_map(|id| self.chat_jobs.get(id))
            .collect();
        jobs.sort_by_key(|j| j.created_at_ms);
        jobs
    }

    /// Used by `getActiveForThread`: pending, else running, for one thread.
    /// Always via the `(thread, status)` compound index.
    pub fn list_chat_jobs_by_thread_status(&self, thread_id: ChatThreadId, status: JobStatus) -> Vec<&ChatJob> {
        let mut jobs: Vec<&ChatJob> = self
            .chat_jobs_by_thread_status
            .get(&(thread_id, status))
            .into_iter()
            .flatten()
            .filter_map(|id| self.chat_jobs.get(id))
            .collect();
        jobs.sort_by_key(|j| j.created_at_ms);
        jobs
    }
}
