//! Configurations for tests.
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use montorrent_configuration::{Configuration, Credentials, Threshold};

/// This configuration is used for testing. The server binds to an ephemeral
/// port so tests can run in parallel, logging is off and the cache disabled.
///
/// Remote calls are attempted only twice, without delay, so a failing fake
/// backend does not slow the tests down.
#[must_use]
pub fn ephemeral() -> Configuration {
    let mut config = Configuration::default();

    config.logging.threshold = Threshold::Off; // Change to `debug` for tests debugging

    config.status_api.bind_address = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0);
    config.status_api.cache_secs = 0;

    config.backend.retry_budget = 2;
    config.backend.retry_delay_secs = 0;

    config
}

/// Ephemeral configuration serving snapshots for `cache_secs` seconds.
#[must_use]
pub fn ephemeral_with_cache(cache_secs: u64) -> Configuration {
    let mut config = ephemeral();

    config.status_api.cache_secs = cache_secs;

    config
}

/// Ephemeral configuration protected with basic authentication.
#[must_use]
pub fn ephemeral_with_credentials(username: &str, password: &str) -> Configuration {
    let mut config = ephemeral();

    config.status_api.credentials = Some(Credentials {
        username: username.to_owned(),
        password: password.to_owned(),
    });

    config
}
