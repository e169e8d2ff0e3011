// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

use super::*;

crate::define_id! {
    pub struct TestId("tst-");
}

#[test]
fn new_ids_carry_the_prefix() {
    let id = TestId::new();
    assert!(id.as_str().starts_with("tst-"));
    assert_eq!(id.as_str().len(), ID_MAX_LEN);
}

#[test]
fn suffix_strips_prefix() {
    let id = TestId::from_string("tst-abc123");
    assert_eq!(id.suffix(), "abc123");
}

#[test]
fn short_truncates_suffix() {
    let id = TestId::from_string("tst-abcdefgh");
    assert_eq!(id.short(3), "abc");
}

#[test]
fn two_random_ids_differ() {
    assert_ne!(TestId::new(), TestId::new());
}

#[test]
fn roundtrips_through_serde_json() {
    let id = TestId::from_string("tst-abc123");
    let json = serde_json::to_string(&id).unwrap();
    let back: TestId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, back);
}

#[test]
fn display_matches_as_str() {
    let id = TestId::from_string("tst-abc123");
    assert_eq!(format!("{id}"), "tst-abc123");
}
