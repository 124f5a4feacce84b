//! Setup for the main application.
//!
//! The [`setup`] only builds the application. It does not start it:
//!
//! - Loads the configuration.
//! - Initializes the static values and the logging.
//! - Builds the [`CacheGate`] on top of the configured rtorrent backend.
use std::sync::Arc;

use montorrent_clock::static_time;
use montorrent_configuration::Configuration;
use tracing::info;

use super::config::{initialize_configuration, Args};
use crate::bootstrap;
use crate::core::backend;
use crate::core::cache::CacheGate;
use crate::core::invoker::Invoker;

/// It loads the configuration and builds the application.
///
/// # Panics
///
/// Will panic if the configuration cannot be loaded or is not valid.
#[must_use]
pub fn setup(args: &Args) -> (Configuration, Arc<CacheGate>) {
    let configuration = initialize_configuration(args).expect("it should load a valid configuration");

    let gate = initialize_with_configuration(&configuration);

    (configuration, gate)
}

/// It initializes the application with the given configuration.
#[must_use]
pub fn initialize_with_configuration(configuration: &Configuration) -> Arc<CacheGate> {
    initialize_static();
    initialize_logging(configuration);

    let mut masked = configuration.clone();
    masked.mask_secrets();
    info!("Configuration:\n{}", masked.to_toml());

    Arc::new(initialize_cache_gate(configuration))
}

/// It initializes the global static values.
pub fn initialize_static() {
    // Set the time of the app start
    lazy_static::initialize(&static_time::TIME_AT_APP_START);
}

/// It builds the status cache on top of the configured rtorrent backend.
#[must_use]
pub fn initialize_cache_gate(config: &Configuration) -> CacheGate {
    let backend = backend::factory(&config.backend);

    let invoker = Invoker::new(backend, config.backend.retry_budget, config.backend.retry_delay());

    CacheGate::new(invoker, config.status_api.cache_window())
}

/// It initializes the logging.
pub fn initialize_logging(config: &Configuration) {
    bootstrap::logging::setup(config);
}
