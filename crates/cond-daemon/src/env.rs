// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

//! Centralized environment variable access for the daemon crate
//! (SPEC_FULL.md §1 "Ambient stack added here").

use std::path::PathBuf;
use std::time::Duration;

/// The Auth Gate's shared secret (spec.md §4.1, §6.1). `None` means the
/// server is misconfigured: every operation will fail `ServerMisconfigured`.
pub fn auth_token() -> Option<String> {
    std::env::var("CONDUCTOR_AUTH_TOKEN").ok().filter(|s| !s.is_empty())
}

/// Resolve the state directory: `CONDUCTOR_STATE_DIR` > `XDG_STATE_HOME/conductor`
/// > `~/.local/state/conductor`. Unused by the in-memory store today; resolved
/// for forward compatibility with a persistent backend (SPEC_FULL.md §1).
pub fn state_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("CONDUCTOR_STATE_DIR") {
        return Some(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Some(PathBuf::from(xdg).join("conductor"));
    }
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".local/state/conductor"))
}

/// Subscription poll interval referenced in spec.md's Design Notes §9 for
/// implementations without a push-based store; unused by the `watch`-channel
/// notifier here but resolved for a polling-based backend.
pub fn poll_interval() -> Duration {
    std::env::var("CONDUCTOR_POLL_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_millis(250))
}

/// Unix socket path: `CONDUCTOR_SOCKET` or `<state_dir>/conductor.sock`.
pub fn socket_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("CONDUCTOR_SOCKET") {
        return Some(PathBuf::from(path));
    }
    Some(state_dir()?.join("conductor.sock"))
}

/// Optional TCP port. When set, the daemon listens on this port in addition
/// to the Unix socket, for remote (e.g. containerized runner) deployments.
pub fn tcp_port() -> Option<u16> {
    std::env::var("CONDUCTOR_TCP_PORT").ok().and_then(|s| s.parse::<u16>().ok())
}

/// Per-message read/write timeout.
pub fn ipc_timeout() -> Duration {
    std::env::var("CONDUCTOR_IPC_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(10))
}
