// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

//! C7 Chat Thread Service: thread/message CRUD, session-id continuity,
//! guardian-mode linking (spec.md §4.7).

use cond_core::{
    AssignmentId, ChatMessage, ChatMessageId, ChatMode, ChatRole, ChatThread, ChatThreadId, CoreError, NamespaceId,
    PromptMode,
};
use tracing::info;

use crate::{Engine, EngineError};

impl Engine {
    pub fn create_chat_thread(
        &self,
        password: &str,
        namespace_id: NamespaceId,
        title: impl Into<String>,
    ) -> Result<ChatThreadId, EngineError> {
        self.authorize(password)?;
        let now = self.store.now_ms();
        let id = self.store.mutate(|state| {
            if state.get_namespace(namespace_id).is_none() {
                return Err(EngineError::not_found("namespace", namespace_id.to_string()));
            }
            let thread = ChatThread::new(namespace_id, title, now);
            Ok(state.insert_chat_thread(thread))
        })?;
        info!(thread_id = %id, %namespace_id, "chat_thread.create");
        Ok(id)
    }

    /// Newest-first by `updated_at_ms` (spec.md §4.7).
    pub fn list_chat_threads(&self, password: &str, namespace_id: NamespaceId) -> Result<Vec<ChatThread>, EngineError> {
        self.authorize(password)?;
        Ok(self.store.read(|state| state.list_chat_threads_by_namespace(namespace_id).into_iter().cloned().collect()))
    }

    pub fn get_chat_thread(&self, password: &str, id: ChatThreadId) -> Result<ChatThread, EngineError> {
        self.authorize(password)?;
        self.store.read(|state| state.get_chat_thread(id).cloned()).ok_or_else(|| EngineError::not_found("thread", id.to_string()))
    }

    /// A guardian-mode thread refuses to move to any other mode (spec.md
    /// Design Note §9, Open Question 2: "implementors should refuse for
    /// safety"). Moving *into* `guardian` this way is allowed, though
    /// `enable_guardian_mode` is the atomic, assignment-aware path.
    pub fn update_chat_thread_mode(&self, password: &str, id: ChatThreadId, mode: ChatMode) -> Result<ChatThread, EngineError> {
        self.authorize(password)?;
        let now = self.store.now_ms();
        self.store.mutate(|state| {
            let thread = state.get_chat_thread_mut(id).ok_or_else(|| EngineError::not_found("thread", id.to_string()))?;
            if thread.mode == ChatMode::Guardian && mode != ChatMode::Guardian {
                return Err(CoreError::IllegalTransition(format!(
                    "thread {id} is in guardian mode and cannot move to {mode}"
                ))
                .into());
            }
            thread.mode = mode;
            thread.updated_at_ms = now;
            Ok(thread.clone())
        })
    }

    pub fn update_chat_thread_title(&self, password: &str, id: ChatThreadId, title: impl Into<String>) -> Result<ChatThread, EngineError> {
        self.authorize(password)?;
        let now = self.store.now_ms();
        self.store.mutate(|state| {
            let thread = state.get_chat_thread_mut(id).ok_or_else(|| EngineError::not_found("thread", id.to_string()))?;
            thread.title = title.into();
            thread.updated_at_ms = now;
            Ok(thread.clone())
        })
    }

    pub fn update_chat_thread_session_id(
        &self,
        password: &str,
        id: ChatThreadId,
        claude_session_id: Option<String>,
    ) -> Result<ChatThread, EngineError> {
        self.authorize(password)?;
        let now = self.store.now_ms();
        self.store.mutate(|state| {
            let thread = state.get_chat_thread_mut(id).ok_or_else(|| EngineError::not_found("thread", id.to_string()))?;
            thread.claude_session_id = claude_session_id;
            thread.updated_at_ms = now;
            Ok(thread.clone())
        })
    }

    pub fn update_chat_thread_last_prompt_mode(
        &self,
        password: &str,
        id: ChatThreadId,
        last_prompt_mode: Option<PromptMode>,
    ) -> Result<ChatThread, EngineError> {
        self.authorize(password)?;
        let now = self.store.now_ms();
        self.store.mutate(|state| {
            let thread = state.get_chat_thread_mut(id).ok_or_else(|| EngineError::not_found("thread", id.to_string()))?;
            thread.last_prompt_mode = last_prompt_mode;
            thread.updated_at_ms = now;
            Ok(thread.clone())
        })
    }

    /// Links a thread to an assignment. A guardian-mode thread already
    /// linked to a *different* assignment refuses re-linking (Open
    /// Question 2).
    pub fn link_chat_thread_assignment(
        &self,
        password: &str,
        id: ChatThreadId,
        assignment_id: AssignmentId,
    ) -> Result<ChatThread, EngineError> {
        self.authorize(password)?;
        let now = self.store.now_ms();
        self.store.mutate(|state| {
            if state.get_assignment(assignment_id).is_none() {
                return Err(EngineError::not_found("assignment", assignment_id.to_string()));
            }
            {
                let thread = state.get_chat_thread(id).ok_or_else(|| EngineError::not_found("thread", id.to_string()))?;
                if thread.mode == ChatMode::Guardian && thread.assignment_id.is_some_and(|existing| existing != assignment_id) {
                    return Err(CoreError::IllegalTransition(format!(
                        "thread {id} is guardian-linked to a different assignment"
                    ))
                    .into());
                }
            }
            state.link_chat_thread_assignment(id, assignment_id);
            let thread = state.get_chat_thread_mut(id).ok_or_else(|| EngineError::not_found("thread", id.to_string()))?;
            thread.assignment_id = Some(assignment_id);
            thread.updated_at_ms = now;
            Ok(thread.clone())
        })
    }

    /// Atomic: link + `thread.mode = guardian` + `assignment.alignment_status
    /// = aligned` (spec.md §4.7).
    pub fn enable_guardian_mode(
        &self,
        password: &str,
        id: ChatThreadId,
        assignment_id: AssignmentId,
    ) -> Result<ChatThread, EngineError> {
        self.authorize(password)?;
        let now = self.store.now_ms();
        let thread = self.store.mutate(|state| {
            if state.get_assignment(assignment_id).is_none() {
                return Err(EngineError::not_found("assignment", assignment_id.to_string()));
            }
            state.link_chat_thread_assignment(id, assignment_id);
            let thread = state.get_chat_thread_mut(id).ok_or_else(|| EngineError::not_found("thread", id.to_string()))?;
            thread.assignment_id = Some(assignment_id);
            thread.mode = ChatMode::Guardian;
            thread.updated_at_ms = now;
            let thread = thread.clone();

            let assignment = state
                .get_assignment_mut(assignment_id)
                .ok_or_else(|| EngineError::not_found("assignment", assignment_id.to_string()))?;
            assignment.alignment_status = Some(cond_core::AlignmentStatus::Aligned);
            assignment.updated_at_ms = now;
            Ok(thread)
        })?;
        info!(thread_id = %id, %assignment_id, "chat_thread.enable_guardian_mode");
        Ok(thread)
    }

    pub fn get_guardian_thread(&self, password: &str, assignment_id: AssignmentId) -> Result<Option<ChatThread>, EngineError> {
        self.authorize(password)?;
        Ok(self.store.read(|state| state.get_guardian_thread(assignment_id).cloned()))
    }

    /// Cascades chat messages (spec.md §4.7).
    pub fn remove_chat_thread(&self, password: &str, id: ChatThreadId) -> Result<(), EngineError> {
        self.authorize(password)?;
        self.store.mutate(|state| {
            state.remove_chat_thread(id).ok_or_else(|| EngineError::not_found("thread", id.to_string()))
        })?;
        Ok(())
    }

    /// `ChatMessage.add`: inserts the message and patches the thread's
    /// `updated_at_ms` (spec.md §4.7).
    pub fn add_chat_message(
        &self,
        password: &str,
        thread_id: ChatThreadId,
        role: ChatRole,
        content: impl Into<String>,
        hint: Option<String>,
    ) -> Result<ChatMessageId, EngineError> {
        self.authorize(password)?;
        let now = self.store.now_ms();
        let id = self.store.mutate(|state| {
            if state.get_chat_thread(thread_id).is_none() {
                return Err(EngineError::not_found("thread", thread_id.to_string()));
            }
            let message = ChatMessage::new(thread_id, role, content, hint, now);
            let id = state.insert_chat_message(message);
            if let Some(thread) = state.get_chat_thread_mut(thread_id) {
                thread.updated_at_ms = now;
            }
            Ok(id)
        })?;
        Ok(id)
    }

    pub fn list_chat_messages(&self, password: &str, thread_id: ChatThreadId) -> Result<Vec<ChatMessage>, EngineError> {
        self.authorize(password)?;
        Ok(self.store.read(|state| state.list_chat_messages_by_thread(thread_id).into_iter().cloned().collect()))
    }
}

#[cfg(test)]
#[path = "chat_threads_tests.rs"]
mod tests;
