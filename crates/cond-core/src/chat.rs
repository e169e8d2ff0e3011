// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

//! Chat threads and messages: the conversational path, independent of the
//! assignment chain but able to link into one via guardian mode.

use serde::{Deserialize, Serialize};

use crate::assignment::AssignmentId;
use crate::namespace::NamespaceId;

crate::define_id! {
    /// Unique identifier for a chat thread.
    pub struct ChatThreadId("thr-");
}

crate::define_id! {
    /// Unique identifier for a chat message.
    pub struct ChatMessageId("msg-");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatMode {
    Jam,
    Cook,
    Guardian,
}

crate::simple_display! {
    ChatMode {
        Jam => "jam",
        Cook => "cook",
        Guardian => "guardian",
    }
}

/// A non-guardian prompt mode: the last mode actually sent to the harness,
/// used by the runner to decide whether to emit a differential prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptMode {
    Jam,
    Cook,
}

crate::simple_display! {
    PromptMode {
        Jam => "jam",
        Cook => "cook",
    }
}

impl From<ChatMode> for Option<PromptMode> {
    fn from(mode: ChatMode) -> Self {
        match mode {
            ChatMode::Jam => Some(PromptMode::Jam),
            ChatMode::Cook => Some(PromptMode::Cook),
            ChatMode::Guardian => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
    Pm,
}

crate::simple_display! {
    ChatRole {
        User => "user",
        Assistant => "assistant",
        Pm => "pm",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatThread {
    pub id: ChatThreadId,
    pub namespace_id: NamespaceId,
    pub title: String,
    pub mode: ChatMode,
    pub last_prompt_mode: Option<PromptMode>,
    pub assignment_id: Option<AssignmentId>,
    pub claude_session_id: Option<String>,
    pub created_at_ms: u64,
    pub updated_at_ms: u64,
}

impl ChatThread {
    pub fn new(namespace_id: NamespaceId, title: impl Into<String>, now_ms: u64) -> Self {
        Self {
            id: ChatThreadId::new(),
            namespace_id,
            title: title.into(),
            mode: ChatMode::Jam,
            last_prompt_mode: None,
            assignment_id: None,
            claude_session_id: None,
            created_at_ms: now_ms,
            updated_at_ms: now_ms,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: ChatMessageId,
    pub thread_id: ChatThreadId,
    pub role: ChatRole,
    pub content: String,
    pub hint: Option<String>,
    pub created_at_ms: u64,
}

impl ChatMessage {
    pub fn new(
        thread_id: ChatThreadId,
        role: ChatRole,
        content: impl Into<String>,
        hint: Option<String>,
        now_ms: u64,
    ) -> Self {
        Self { id: ChatMessageId::new(), thread_id, role, content: content.into(), hint, created_at_ms: now_ms }
    }
}
