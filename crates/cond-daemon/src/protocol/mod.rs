// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

//! IPC protocol for daemon communication (SPEC_FULL.md §6.2).
//!
//! Wire format: 4-byte length prefix (big-endian) + JSON payload, grounded
//! in `oj-wire`.

mod request;
mod response;
mod types;
mod wire;

pub use request::{Envelope, Request};
pub use response::Response;
pub use types::{AssignmentPatchWire, FieldPatch, NewJobWire};
pub use wire::{decode, encode, read_envelope, read_message, write_message, write_response, ProtocolError};
