//! montorrent application.
//!
//! The application is a container for its services. Today there is only one,
//! always started:
//!
//! - Status API: serves the status of the rtorrent downloads.
use std::sync::Arc;

use montorrent_configuration::Configuration;
use tokio::task::JoinHandle;

use crate::bootstrap::jobs::status_api;
use crate::core::cache::CacheGate;

/// It starts the application jobs.
///
/// # Panics
///
/// Will panic if the status API cannot be started.
pub async fn start(config: &Configuration, gate: Arc<CacheGate>) -> Vec<JoinHandle<()>> {
    let mut jobs: Vec<JoinHandle<()>> = Vec::new();

    jobs.push(status_api::start_job(&config.status_api, gate).await);

    jobs
}
