// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

use super::*;
use cond_core::{FakeClock, Namespace};

#[test]
fn mutate_and_read_observe_the_same_state() {
    let store = Store::new(Arc::new(FakeClock::new()));
    let id = store.mutate(|state| state.insert_namespace(Namespace::new("acme", None, store_now(&store))));
    assert!(store.read(|state| state.get_namespace(id).is_some()));
}

fn store_now(store: &Store) -> u64 {
    store.now_ms()
}

#[tokio::test]
async fn subscribers_wake_on_notify() {
    let store = Store::new(Arc::new(FakeClock::new()));
    let ns_id = cond_core::NamespaceId::new();
    let mut rx = store.subscribe(ns_id);
    let initial = *rx.borrow();
    store.notify(ns_id);
    rx.changed().await.unwrap();
    assert_ne!(*rx.borrow(), initial);
}
