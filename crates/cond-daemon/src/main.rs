// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

//! `condd`: the conductor daemon binary.

use std::sync::Arc;

use cond_daemon::{env, listener::Listener};
use cond_engine::Engine;
use tokio::net::{TcpListener, UnixListener};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let auth_secret = env::auth_token();
    if auth_secret.is_none() {
        warn!(
            "CONDUCTOR_AUTH_TOKEN is not set; every request will fail with ServerMisconfigured \
             until the daemon is restarted with a secret"
        );
    }

    let engine = Arc::new(Engine::in_memory(Arc::new(cond_core::SystemClock), auth_secret));

    let socket_path = env::socket_path()
        .ok_or("could not resolve a socket path: set CONDUCTOR_SOCKET or HOME")?;
    if let Some(parent) = socket_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if socket_path.exists() {
        std::fs::remove_file(&socket_path)?;
    }
    let unix = UnixListener::bind(&socket_path)?;
    info!(path = %socket_path.display(), "listening on unix socket");

    let tcp = match env::tcp_port() {
        Some(port) => {
            let tcp = TcpListener::bind(("0.0.0.0", port)).await?;
            info!(port, "listening on tcp");
            Some(tcp)
        }
        None => None,
    };

    let listener = Listener::new(unix, tcp, engine);
    tokio::select! {
        _ = listener.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("received ctrl-c, shutting down");
        }
    }

    let _ = std::fs::remove_file(&socket_path);
    Ok(())
}
