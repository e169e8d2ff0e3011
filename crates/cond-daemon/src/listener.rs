// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

//! Accepts connections and dispatches one request per connection onto
//! `cond-engine::Engine`. Each connection is: read one [`Envelope`],
//! dispatch, write one [`Response`] — except `SchedulerWatchQueue`, which
//! upgrades the connection into a push stream (SPEC_FULL.md §4.6).

use std::sync::Arc;

use cond_engine::Engine;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, UnixListener};
use tracing::{debug, error, info, warn};

use crate::dispatch::dispatch;
use crate::env;
use crate::protocol::{self, Envelope, ProtocolError, Request, Response};

pub struct Listener {
    unix: UnixListener,
    tcp: Option<TcpListener>,
    engine: Arc<Engine>,
}

impl Listener {
    pub fn new(unix: UnixListener, tcp: Option<TcpListener>, engine: Arc<Engine>) -> Self {
        Self { unix, tcp, engine }
    }

    /// Runs until the process is killed; each accepted connection is
    /// handled in its own task so a slow or stuck client never blocks
    /// others (spec.md §5: the store's lock is held only for the minimal
    /// read/mutate span, never across connection I/O).
    pub async fn run(self) {
        let Listener { unix, tcp, engine } = self;
        match tcp {
            Some(tcp) => run_dual(unix, tcp, engine).await,
            None => run_unix_only(unix, engine).await,
        }
    }
}

async fn run_unix_only(unix: UnixListener, engine: Arc<Engine>) {
    loop {
        match unix.accept().await {
            Ok((stream, _)) => {
                let engine = Arc::clone(&engine);
                tokio::spawn(async move {
                    let (reader, writer) = stream.into_split();
                    if let Err(e) = handle_connection(reader, writer, &engine).await {
                        log_connection_error(e);
                    }
                });
            }
            Err(e) => error!("unix accept error: {e}"),
        }
    }
}

async fn run_dual(unix: UnixListener, tcp: TcpListener, engine: Arc<Engine>) {
    loop {
        tokio::select! {
            result = unix.accept() => {
                match result {
                    Ok((stream, _)) => {
                        let engine = Arc::clone(&engine);
                        tokio::spawn(async move {
                            let (reader, writer) = stream.into_split();
                            if let Err(e) = handle_connection(reader, writer, &engine).await {
                                log_connection_error(e);
                            }
                        });
                    }
                    Err(e) => error!("unix accept error: {e}"),
                }
            }
            result = tcp.accept() => {
                match result {
                    Ok((stream, addr)) => {
                        debug!("tcp connection from {addr}");
                        let engine = Arc::clone(&engine);
                        tokio::spawn(async move {
                            let (reader, writer) = stream.into_split();
                            if let Err(e) = handle_connection(reader, writer, &engine).await {
                                log_connection_error(e);
                            }
                        });
                    }
                    Err(e) => error!("tcp accept error: {e}"),
                }
            }
        }
    }
}

fn log_connection_error(e: ProtocolError) {
    match e {
        ProtocolError::ConnectionClosed => debug!("client disconnected"),
        ProtocolError::Timeout => warn!("connection timed out"),
        other => error!("connection error: {other}"),
    }
}

async fn handle_connection<R, W>(mut reader: R, mut writer: W, engine: &Engine) -> Result<(), ProtocolError>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let timeout = env::ipc_timeout();
    let Envelope { password, request } = protocol::read_envelope(&mut reader, timeout).await?;

    if matches!(request, Request::Ping) {
        return protocol::write_response(&mut writer, &Response::Pong, timeout).await;
    }

    if let Request::SchedulerWatchQueue { namespace_id } = request {
        return stream_queue_changes(engine, &password, namespace_id, &mut writer, timeout).await;
    }

    info!(?request, "dispatching request");
    let response = dispatch(engine, &password, request);
    protocol::write_response(&mut writer, &response, timeout).await
}

/// Streams `Response::QueueChanged` every time the namespace's ready queue
/// is invalidated, until the write side errors (client gone).
async fn stream_queue_changes<W: AsyncWrite + Unpin>(
    engine: &Engine,
    password: &str,
    namespace_id: cond_core::NamespaceId,
    writer: &mut W,
    timeout: std::time::Duration,
) -> Result<(), ProtocolError> {
    let mut watch = match engine.watch_queue(password, namespace_id) {
        Ok(w) => w,
        Err(e) => return protocol::write_response(writer, &Response::from(e), timeout).await,
    };
    protocol::write_response(writer, &Response::QueueChanged { namespace_id }, timeout).await?;
    while watch.changed().await.is_ok() {
        protocol::write_response(writer, &Response::QueueChanged { namespace_id }, timeout).await?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
