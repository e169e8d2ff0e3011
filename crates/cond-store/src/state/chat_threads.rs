// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

use cond_core::{AssignmentId, ChatMessage, ChatMessageId, ChatThread, ChatThreadId, NamespaceId};

use super::StoreInner;

impl StoreInner {
    pub fn insert_chat_thread(&mut self, thread: ChatThread) -> ChatThreadId {
        let id = thread.id;
        self.chat_threads_by_namespace.entry(thread.namespace_id).or_default().insert(id);
        if let Some(assignment_id) = thread.assignment_id {
            self.chat_threads_by_assignment.insert(assignment_id, id);
        }
        self.chat_threads.insert(id, thread);
        id
    }

    pub fn get_chat_thread(&self, id: ChatThreadId) -> Option<&ChatThread> {
        self.chat_threads.get(&id)
    }

    pub fn get_chat_thread_mut(&mut self, id: ChatThreadId) -> Option<&mut ChatThread> {
        self.chat_threads.get_mut(&id)
    }

    /// Newest-first by `updated_at_ms` (spec.md §4.7).
    pub fn list_chat_threads_by_namespace(&self, namespace_id: NamespaceId) -> Vec<&ChatThread> {
        let mut threads: Vec<&ChatThread> = self
            .chat_threads_by_namespace
            .get(&namespace_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.chat_threads.get(id))
            .collect();
        threads.sort_by(|a, b| b.updated_at_ms.cmp(&a.updated_at_ms));
        threads
    }

    pub fn link_chat_thread_assignment(&mut self, thread_id: ChatThreadId, assignment_id: AssignmentId) {
        self.chat_threads_by_assignment.insert(assignment_id, thread_id);
    }

    pub fn get_guardian_thread(&self, assignment_id: AssignmentId) -> Option<&ChatThread> {
        let thread_id = self.chat_threads_by_assignment.get(&assignment_id)?;
        let thread = self.chat_threads.get(thread_id)?;
        (thread.mode == cond_core::ChatMode::Guardian).then_some(thread)
    }

    pub fn unlink_chat_threads_for_assignment(&mut self, assignment_id: AssignmentId) {
        self.chat_threads_by_assignment.remove(&assignment_id);
        for thread in self.chat_threads.values_mut() {
            if thread.assignment_id == Some(assignment_id) {
                thread.assignment_id = None;
            }
        }
    }

    pub fn remove_chat_thread(&mut self, id: ChatThreadId) -> Option<ChatThread> {
        let thread = self.chat_threads.remove(&id)?;
        if let Some(set) = self.chat_threads_by_namespace.get_mut(&thread.namespace_id) {
            set.remove(&id);
        }
        if let Some(assignment_id) = thread.assignment_id {
            if self.chat_threads_by_assignment.get(&assignment_id) == Some(&id) {
                self.chat_threads_by_assignment.remove(&assignment_id);
            }
        }
        let message_ids: Vec<_> = self.chat_messages_by_thread.remove(&id).into_iter().flatten().collect();
        for message_id in message_ids {
            self.chat_messages.remove(&message_id);
        }
        Some(thread)
    }

    pub fn insert_chat_message(&mut self, message: ChatMessage) -> ChatMessageId {
        let id = message.id;
        self.chat_messages_by_thread.entry(message.thread_id).or_default().push(id);
        self.chat_messages.insert(id, message);
        id
    }

    /// Ordered strictly by `created_at_ms` (spec.md §3.6).
    pub fn list_chat_messages_by_thread(&self, thread_id: ChatThreadId) -> Vec<&ChatMessage> {
        self.chat_messages_by_thread
            .get(&thread_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.chat_messages.get(id))
            .collect()
    }
}
