// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cond-engine: the operation surface over `cond-store`.
//!
//! Every public method takes a `password` first and runs it through the
//! Auth Gate (`auth::check`) before touching the store. Mutating
//! operations acquire the store's lock for the minimum span needed to
//! read-modify-write; the scheduler is a pure read with no lock held
//! across an `.await`.

pub mod assignments;
pub mod auth;
pub mod chain;
pub mod chat_jobs;
pub mod chat_threads;
pub mod error;
pub mod groups;
pub mod namespaces;
pub mod scheduler;

pub use error::EngineError;
pub use scheduler::{ReadyChatJob, ReadyJob};

use std::sync::Arc;

use cond_core::Clock;
use cond_store::Store;

/// The conductor engine: the single entry point for every public
/// operation named in spec.md §6.2.
#[derive(Clone)]
pub struct Engine {
    store: Store,
    auth_secret: Option<String>,
}

impl Engine {
    pub fn new(store: Store, auth_secret: Option<String>) -> Self {
        Self { store, auth_secret }
    }

    /// Build a fresh engine over an empty in-memory store, for tests and
    /// library embedding. `auth_secret = None` means every call returns
    /// `ServerMisconfigured` until the caller sets one via `with_secret`.
    pub fn in_memory(clock: Arc<dyn Clock>, auth_secret: Option<String>) -> Self {
        Self::new(Store::new(clock), auth_secret)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    fn authorize(&self, password: &str) -> Result<(), EngineError> {
        auth::check(self.auth_secret.as_deref(), password)
    }
}
