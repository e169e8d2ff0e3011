// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cond-store: the in-memory stand-in for spec.md's "C1 Store" — a
//! transactional document database with single-document atomic mutations,
//! secondary indexes, and real-time subscriptions.
//!
//! A single [`parking_lot::Mutex`] around [`StoreInner`] gives every
//! mutation the "effectively single-threaded per mutation" semantics
//! spec.md §5 asks for: a multi-document transaction (group creation +
//! head pointer, predecessor splice, status change + namespace counter
//! adjustment) is just a closure run under one lock acquisition.
//!
//! Live queue notification (spec.md Design Notes §9) is implemented here
//! as a `tokio::sync::watch` channel per namespace, bumped by every
//! mutation that touches assignments, job groups, or jobs in that
//! namespace; `cond-engine::scheduler::watch_queue` re-evaluates
//! `get_ready_jobs` each time it fires.

pub mod state;

use std::collections::HashMap;
use std::sync::Arc;

use cond_core::{Clock, NamespaceId};
use parking_lot::Mutex;
use tokio::sync::watch;

pub use state::StoreInner;

/// Transactional in-memory store. Cheap to clone (wraps an `Arc`).
#[derive(Clone)]
pub struct Store {
    clock: Arc<dyn Clock>,
    inner: Arc<Mutex<StoreInner>>,
    notifiers: Arc<Mutex<HashMap<NamespaceId, watch::Sender<u64>>>>,
}

impl Store {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock, inner: Arc::new(Mutex::new(StoreInner::new())), notifiers: Arc::new(Mutex::new(HashMap::new())) }
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Run a read-only closure under the lock.
    pub fn read<R>(&self, f: impl FnOnce(&StoreInner) -> R) -> R {
        f(&self.inner.lock())
    }

    /// Run a mutation under the lock. This is the store's transaction
    /// boundary: everything the closure does is one atomic step as far as
    /// any reader is concerned, since readers also take the same lock.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut StoreInner) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Bump the per-namespace revision counter, waking any `watch_queue`
    /// subscriber. Call after a mutation that touches assignments, job
    /// groups, jobs, or chat-jobs in `namespace_id`.
    pub fn notify(&self, namespace_id: NamespaceId) {
        let mut notifiers = self.notifiers.lock();
        let sender = notifiers.entry(namespace_id).or_insert_with(|| watch::channel(0).0);
        sender.send_modify(|rev| *rev = rev.wrapping_add(1));
    }

    /// Subscribe to revision changes for one namespace's ready-queue.
    pub fn subscribe(&self, namespace_id: NamespaceId) -> watch::Receiver<u64> {
        let mut notifiers = self.notifiers.lock();
        notifiers.entry(namespace_id).or_insert_with(|| watch::channel(0).0).subscribe()
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
