//! Version `1` for `montorrent` configuration data structures.
//!
//! This module contains the configuration data structures for `montorrent`.
//!
//! The configuration is loaded from a [TOML](https://toml.io/en/) file
//! `montorrent.toml` in the project root folder or from an environment
//! variable with the same content as the file.
//!
//! Configuration can not only be loaded from a file, but also from an
//! environment variable `MONTORRENT_CONFIG_TOML`. This is useful when running
//! the service in a Docker container or environments where you do not have a
//! persistent storage or you cannot inject a configuration file.
//!
//! When configuration is loaded from the environment variable it has priority
//! over the configuration file.
//!
//! # Sections
//!
//! Each section in the toml structure is mapped to a data structure. For
//! example, the `[status_api]` section is mapped to the
//! [`StatusApi`](crate::v1::status_api::StatusApi) structure.
//!
//! # Default configuration
//!
//! ```toml
//! [logging]
//! threshold = "info"
//!
//! [backend]
//! kind = "command"
//! scgi_address = "localhost:5000"
//! program = "rtorrentrpc"
//! retry_budget = 20
//! retry_delay_secs = 2
//!
//! [status_api]
//! bind_address = "127.0.0.1:8080"
//! cache_secs = 0
//! ```
//!
//! HTTPS and basic authentication are enabled by adding their sections:
//!
//! ```toml
//! [status_api.tsl_config]
//! ssl_cert_path = "./storage/montorrent/lib/tls/localhost.crt"
//! ssl_key_path = "./storage/montorrent/lib/tls/localhost.key"
//!
//! [status_api.credentials]
//! username = "admin"
//! password = "MyPassword"
//! ```
pub mod backend;
pub mod logging;
pub mod status_api;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use self::backend::Backend;
use self::logging::Logging;
use self::status_api::StatusApi;
use crate::{Error, Info, CONFIG_OVERRIDE_PREFIX, CONFIG_OVERRIDE_SEPARATOR};

/// The whole configuration.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Default)]
pub struct Configuration {
    /// Logging configuration
    #[serde(default)]
    pub logging: Logging,

    /// rtorrent backend configuration.
    #[serde(default)]
    pub backend: Backend,

    /// Status HTTP server configuration.
    #[serde(default)]
    pub status_api: StatusApi,
}

impl Configuration {
    /// Loads the configuration from the `Info` struct.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the configuration sources cannot be merged, or the
    /// resulting configuration is not valid.
    pub fn load(info: &Info) -> Result<Configuration, Error> {
        let figment = if let Some(config_toml) = &info.config_toml {
            Figment::from(Serialized::defaults(Configuration::default())).merge(Toml::string(config_toml))
        } else {
            Figment::from(Serialized::defaults(Configuration::default())).merge(Toml::file(&info.config_toml_path))
        };

        let figment = figment.merge(Env::prefixed(CONFIG_OVERRIDE_PREFIX).split(CONFIG_OVERRIDE_SEPARATOR));

        let config: Configuration = figment.extract()?;

        config.validate()?;

        Ok(config)
    }

    /// Checks the values that deserialize fine but cannot work.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the retry budget is zero or the credentials have an
    /// empty username.
    pub fn validate(&self) -> Result<(), Error> {
        if self.backend.retry_budget == 0 {
            return Err(Error::InvalidValue {
                field: "backend.retry_budget",
                reason: "at least one attempt is needed".to_owned(),
            });
        }

        if let Some(credentials) = &self.status_api.credentials {
            if credentials.username.is_empty() {
                return Err(Error::InvalidValue {
                    field: "status_api.credentials.username",
                    reason: "the username cannot be empty".to_owned(),
                });
            }
        }

        Ok(())
    }

    pub fn mask_secrets(&mut self) {
        self.status_api.mask_secrets();
    }

    /// Encodes the configuration to TOML.
    ///
    /// # Panics
    ///
    /// Will panic if it can't be converted to TOML.
    #[must_use]
    pub fn to_toml(&self) -> String {
        toml::to_string(self).expect("Could not encode TOML value")
    }
}
