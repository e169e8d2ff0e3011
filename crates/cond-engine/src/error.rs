// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

//! Engine-level errors: the Auth Gate's two kinds, plus every `CoreError`
//! kind the data model can raise (spec.md §7).

use cond_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("server misconfigured: no auth secret configured")]
    ServerMisconfigured,

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl EngineError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        CoreError::NotFound { kind, id: id.into() }.into()
    }
}
