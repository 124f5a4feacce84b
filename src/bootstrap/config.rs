//! Initialize configuration from file, env vars and command line.
//!
//! The command line flags are applied last, on top of what was loaded by
//! [`Configuration::load`]:
//!
//! Flag | Configuration value
//! ---|---
//! `--config <path>` | The TOML file to load.
//! `--cache <secs>` | `status_api.cache_secs`
//! `--host <host:port>` | `status_api.bind_address`
//! `--scgi <host:port>` | `backend.scgi_address`
//! `--userpass <user:pass>` | `status_api.credentials`
//! `-v`, `--verbose` | `logging.threshold = "debug"`
use std::net::{SocketAddr, ToSocketAddrs as _};

use clap::Parser;
use montorrent_configuration::{Configuration, Credentials, Error, Info, Threshold};

// Default values
pub const DEFAULT_PATH_CONFIG: &str = "./share/default/config/montorrent.development.toml";

/// Serves the status of the rtorrent downloads as JSON.
#[derive(Parser, Debug, Default, Clone)]
#[command(name = "montorrent", version, about)]
pub struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Cache the status for that many seconds. 0 means no caching.
    #[arg(long, value_name = "SECS")]
    pub cache: Option<u64>,

    /// Listening host:port.
    #[arg(long, value_name = "HOST:PORT", value_parser = parse_host)]
    pub host: Option<SocketAddr>,

    /// host:port for rtorrent's SCGI.
    #[arg(long, value_name = "HOST:PORT")]
    pub scgi: Option<String>,

    /// Optional username:password protection.
    #[arg(long, value_name = "USER:PASS")]
    pub userpass: Option<Credentials>,

    /// Log at the debug level, including the backend calls that are retried.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Overrides the loaded configuration with the flags that were given.
    pub fn apply(&self, config: &mut Configuration) {
        if let Some(cache) = self.cache {
            config.status_api.cache_secs = cache;
        }

        if let Some(host) = self.host {
            config.status_api.bind_address = host;
        }

        if let Some(scgi) = &self.scgi {
            config.backend.scgi_address.clone_from(scgi);
        }

        if let Some(credentials) = &self.userpass {
            config.status_api.credentials = Some(credentials.clone());
        }

        if self.verbose {
            config.logging.threshold = Threshold::Debug;
        }
    }
}

/// Resolves `host:port`, so names like `localhost:8080` are accepted.
fn parse_host(host: &str) -> Result<SocketAddr, String> {
    host.to_socket_addrs()
        .map_err(|err| format!("invalid host `{host}`: {err}"))?
        .next()
        .ok_or_else(|| format!("host `{host}` does not resolve to any address"))
}

/// It loads the application configuration from the environment and applies
/// the command line flags on top of it.
///
/// The TOML document is taken from, by priority:
///
/// 1. The `MONTORRENT_CONFIG_TOML` env var (the whole document).
/// 2. The `--config` flag.
/// 3. The `MONTORRENT_CONFIG_TOML_PATH` env var.
/// 4. The default path `./share/default/config/montorrent.development.toml`.
///
/// A missing file is not an error: the defaults are used.
///
/// # Errors
///
/// Will return an error if the configuration cannot be loaded or if the
/// result is not valid.
pub fn initialize_configuration(args: &Args) -> Result<Configuration, Error> {
    let info = Info::new(DEFAULT_PATH_CONFIG.to_string(), args.config.clone())?;

    let mut config = Configuration::load(&info)?;

    args.apply(&mut config);

    config.validate()?;

    Ok(config)
}
