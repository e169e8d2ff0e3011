// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! `cond-daemon`: the process boundary around `cond-engine::Engine`.
//!
//! Owns everything that touches a socket. Nothing outside this crate
//! should need to know the wire format exists.

pub mod dispatch;
pub mod env;
pub mod listener;
pub mod protocol;
