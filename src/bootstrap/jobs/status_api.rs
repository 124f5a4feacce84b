//! Status API job starter.
//!
//! The [`status_api::start_job`](crate::bootstrap::jobs::status_api::start_job)
//! function spawns a new asynchronous task, that tasks is the "**launcher**".
//! The "**launcher**" starts the actual server and sends a message back
//! to the main application.
//!
//! Refer to the [configuration documentation](montorrent_configuration::StatusApi)
//! for the status API configuration options.
use std::sync::Arc;

use montorrent_configuration::StatusApi;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::{make_rust_tls, Started};
use crate::core::cache::CacheGate;
use crate::servers::logging::STARTED_ON;
use crate::servers::signals::Halted;
use crate::servers::status_api::{server, STATUS_API_LOG_TARGET};

/// This function starts a new status API server with the provided
/// configuration.
///
/// The functions starts a new concurrent task that will run the API server.
/// This task will send a message to the main application process to notify
/// that the API server was successfully started.
///
/// # Panics
///
/// It would panic if the TLS configuration cannot be loaded or the server
/// cannot be started.
pub async fn start_job(config: &StatusApi, gate: Arc<CacheGate>) -> JoinHandle<()> {
    let bind_to = config.bind_address;

    let tls = make_rust_tls(&config.tsl_config)
        .await
        .map(|tls| tls.expect("it should have a valid status api tls configuration"));

    let protocol = if tls.is_some() { "https" } else { "http" };

    let credentials = config.credentials.clone();

    let (tx_start, rx_start) = oneshot::channel::<Started>();
    let (tx_halt, rx_halt) = oneshot::channel::<Halted>();

    // Run the API server
    let join_handle = tokio::spawn(async move {
        tracing::info!(target: STATUS_API_LOG_TARGET, "Starting on: {protocol}://{}", bind_to);

        match server::start(bind_to, tls, tx_start, rx_halt, gate, credentials).await {
            Ok(()) => tracing::info!(target: STATUS_API_LOG_TARGET, "Stopped server running on: {protocol}://{}", bind_to),
            Err(err) => tracing::error!(target: STATUS_API_LOG_TARGET, "server on {protocol}://{} failed: {err}", bind_to),
        }
    });

    // Wait until the server sends the started message
    match rx_start.await {
        Ok(msg) => tracing::info!(target: STATUS_API_LOG_TARGET, "{STARTED_ON}: {protocol}://{}", msg.address),
        Err(e) => panic!("the status API server was dropped: {e}"),
    }

    // Wait until the server finishes
    tokio::spawn(async move {
        assert!(!tx_halt.is_closed(), "Halt channel for status API should be open");

        join_handle
            .await
            .expect("it should be able to join to the status API server task");
    })
}
