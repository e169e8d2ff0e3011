// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

//! Error kinds shared by every layer that enforces a core invariant.
//!
//! `cond-engine::EngineError` wraps these with the Auth Gate and transport
//! concerns; `CoreError` itself only ever names the data-model violations
//! listed in spec.md §7.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("illegal transition: {0}")]
    IllegalTransition(String),

    #[error("group must contain at least one job")]
    EmptyGroup,

    #[error("no eligible message found for chat-job trigger")]
    NoEligibleMessage,

    #[error("chain corrupt: {0}")]
    ChainCorrupt(String),
}
