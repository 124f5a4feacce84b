//! Configuration data structures for `montorrent`.
//!
//! `montorrent` polls an rtorrent instance and serves the progress of every
//! download as JSON. The configuration covers three concerns:
//!
//! - [`Logging`]: the log threshold.
//! - [`Backend`]: how to reach rtorrent and how patiently to retry.
//! - [`StatusApi`]: where to serve the status, for how long to cache it, TLS
//!   and basic authentication.
//!
//! The current version for configuration is [`v1`].
//!
//! # Loading
//!
//! The configuration is loaded, in increasing order of priority, from:
//!
//! 1. The defaults.
//! 2. A TOML file (`MONTORRENT_CONFIG_TOML_PATH` or the default path), or the
//!    whole TOML content in the `MONTORRENT_CONFIG_TOML` env var.
//! 3. Single values in env vars prefixed with `MONTORRENT_CONFIG_OVERRIDE_`,
//!    using `__` to separate sections. For example:
//!    `MONTORRENT_CONFIG_OVERRIDE_STATUS_API__CACHE_SECS=30`.
pub mod v1;

use std::env;
use std::sync::Arc;

use camino::Utf8PathBuf;
use montorrent_located_error::{DynError, LocatedError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Environment variables

/// The whole `montorrent.toml` file content. It has priority over the config file.
/// Even if the file is not on the default path.
const ENV_VAR_CONFIG_TOML: &str = "MONTORRENT_CONFIG_TOML";

/// The `montorrent.toml` file location.
pub const ENV_VAR_CONFIG_TOML_PATH: &str = "MONTORRENT_CONFIG_TOML_PATH";

/// Prefix for the env vars that override single configuration values.
pub const CONFIG_OVERRIDE_PREFIX: &str = "MONTORRENT_CONFIG_OVERRIDE_";

/// Section separator for the override env vars.
pub const CONFIG_OVERRIDE_SEPARATOR: &str = "__";

pub type Configuration = v1::Configuration;
pub type Logging = v1::logging::Logging;
pub type Threshold = v1::logging::Threshold;
pub type Backend = v1::backend::Backend;
pub type BackendKind = v1::backend::BackendKind;
pub type StatusApi = v1::status_api::StatusApi;
pub type Credentials = v1::status_api::Credentials;

/// Information required for loading config
#[derive(Debug, Default, Clone)]
pub struct Info {
    config_toml: Option<String>,
    config_toml_path: String,
}

impl Info {
    /// Build Configuration Info.
    ///
    /// The file path is, by priority: the `explicit_config_toml_path` (from
    /// the command line), the `MONTORRENT_CONFIG_TOML_PATH` env var, and the
    /// `default_config_toml_path`.
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to obtain a configuration.
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(default_config_toml_path: String, explicit_config_toml_path: Option<String>) -> Result<Self, Error> {
        let config_toml = if let Ok(config_toml) = env::var(ENV_VAR_CONFIG_TOML) {
            println!("Loading configuration from environment variable:\n {config_toml}");
            Some(config_toml)
        } else {
            None
        };

        let config_toml_path = if let Some(path) = explicit_config_toml_path {
            println!("Loading configuration from file: `{path}` ...");
            path
        } else if let Ok(path) = env::var(ENV_VAR_CONFIG_TOML_PATH) {
            println!("Loading configuration from file: `{path}` ...");
            path
        } else {
            println!("Loading configuration from default configuration file: `{default_config_toml_path}` ...");
            default_config_toml_path
        };

        Ok(Self {
            config_toml,
            config_toml_path,
        })
    }

    /// Info for an in-memory TOML document.
    #[must_use]
    pub fn from_toml(config_toml: &str) -> Self {
        Self {
            config_toml: Some(config_toml.to_owned()),
            config_toml_path: String::new(),
        }
    }
}

/// Errors that can occur when loading the configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// Unable to merge or deserialize the configuration sources.
    #[error("Failed processing the configuration: {source}")]
    ConfigError {
        source: LocatedError<'static, dyn std::error::Error + Send + Sync>,
    },

    /// The configuration was parsed but one of its values is not usable.
    #[error("Invalid configuration value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl From<figment::Error> for Error {
    #[track_caller]
    fn from(err: figment::Error) -> Self {
        Self::ConfigError {
            source: (Arc::new(err) as DynError).into(),
        }
    }
}

/// Certificate and key for serving the status over HTTPS.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Default)]
pub struct TslConfig {
    /// Path to the SSL certificate file.
    #[serde(default = "TslConfig::default_ssl_cert_path")]
    pub ssl_cert_path: Utf8PathBuf,

    /// Path to the SSL key file.
    #[serde(default = "TslConfig::default_ssl_key_path")]
    pub ssl_key_path: Utf8PathBuf,
}

impl TslConfig {
    fn default_ssl_cert_path() -> Utf8PathBuf {
        Utf8PathBuf::new()
    }

    fn default_ssl_key_path() -> Utf8PathBuf {
        Utf8PathBuf::new()
    }
}
