// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

//! C2 Auth Gate: every public operation presents a `password`, compared
//! against the process-wide configured secret before any other work runs.

use crate::error::EngineError;

/// Constant-time byte comparison — the gate should not leak how many
/// leading bytes of an incorrect password matched via timing.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Check `password` against `secret`. Absence of a configured secret is
/// itself a fatal `ServerMisconfigured`, distinct from `Unauthorized`.
pub fn check(secret: Option<&str>, password: &str) -> Result<(), EngineError> {
    let secret = secret.ok_or(EngineError::ServerMisconfigured)?;
    if constant_time_eq(password.as_bytes(), secret.as_bytes()) {
        Ok(())
    } else {
        Err(EngineError::Unauthorized)
    }
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
