//! Logic to run the status API server.
//!
//! [`start`] binds the socket, notifies the bound address through the
//! `tx_start` channel and serves until a halt message arrives through
//! `rx_halt` or the process gets a shutdown signal.
use std::net::SocketAddr;
use std::sync::Arc;

use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;
use montorrent_configuration::Credentials;
use tokio::sync::oneshot::{Receiver, Sender};
use tracing::warn;

use super::routes::router;
use super::STATUS_API_LOG_TARGET;
use crate::bootstrap::jobs::Started;
use crate::core::cache::CacheGate;
use crate::servers::signals::{graceful_shutdown, Halted};

/// Starts the status API server.
///
/// # Errors
///
/// Will return an error if the socket cannot be bound or the server fails
/// while running.
pub async fn start(
    bind_to: SocketAddr,
    tls: Option<RustlsConfig>,
    tx_start: Sender<Started>,
    rx_halt: Receiver<Halted>,
    gate: Arc<CacheGate>,
    credentials: Option<Credentials>,
) -> Result<(), std::io::Error> {
    let socket = std::net::TcpListener::bind(bind_to)?;
    socket.set_nonblocking(true)?;
    let address = socket.local_addr()?;

    let protocol = if tls.is_some() { "https" } else { "http" };

    let handle = Handle::new();

    tokio::task::spawn(graceful_shutdown(
        handle.clone(),
        rx_halt,
        format!("Shutting down status API on {protocol}://{address}"),
    ));

    let make_service = router(gate, credentials).into_make_service_with_connect_info::<SocketAddr>();

    if tx_start.send(Started { address }).is_err() {
        warn!(target: STATUS_API_LOG_TARGET, "nobody is waiting for the status API to start");
    }

    match tls {
        Some(tls) => {
            axum_server::tls_rustls::from_tcp_rustls(socket, tls)
                .handle(handle)
                .serve(make_service)
                .await
        }
        None => axum_server::from_tcp(socket).handle(handle).serve(make_service).await,
    }
}
