use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, TslConfig};

/// Configuration for the HTTP server that publishes the status snapshot.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct StatusApi {
    /// The address the server will bind to.
    /// The format is `ip:port`, for example `0.0.0.0:8080`. If you want the
    /// operating system to choose a random port, use port `0`.
    #[serde(default = "StatusApi::default_bind_address")]
    pub bind_address: SocketAddr,

    /// For how many seconds a snapshot is served before rtorrent is polled
    /// again. `0` disables the cache: every request polls rtorrent.
    #[serde(default = "StatusApi::default_cache_secs")]
    pub cache_secs: u64,

    /// TSL config. The server uses HTTPS when present.
    #[serde(default = "StatusApi::default_tsl_config")]
    pub tsl_config: Option<TslConfig>,

    /// Basic authentication credentials. The status is public when absent.
    #[serde(default = "StatusApi::default_credentials")]
    pub credentials: Option<Credentials>,
}

impl Default for StatusApi {
    fn default() -> Self {
        Self {
            bind_address: Self::default_bind_address(),
            cache_secs: Self::default_cache_secs(),
            tsl_config: Self::default_tsl_config(),
            credentials: Self::default_credentials(),
        }
    }
}

impl StatusApi {
    fn default_bind_address() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 8080)
    }

    fn default_cache_secs() -> u64 {
        0
    }

    #[allow(clippy::unnecessary_wraps)]
    fn default_tsl_config() -> Option<TslConfig> {
        None
    }

    #[allow(clippy::unnecessary_wraps)]
    fn default_credentials() -> Option<Credentials> {
        None
    }

    #[must_use]
    pub fn cache_window(&self) -> Duration {
        Duration::from_secs(self.cache_secs)
    }

    pub fn mask_secrets(&mut self) {
        if let Some(credentials) = &mut self.credentials {
            credentials.password = "***".to_string();
        }
    }
}

/// Username and password for HTTP basic authentication.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Compares both fields without stopping at the first differing byte.
    #[must_use]
    pub fn matches(&self, username: &str, password: &str) -> bool {
        let same_user = eq_bytes(self.username.as_bytes(), username.as_bytes());
        let same_pass = eq_bytes(self.password.as_bytes(), password.as_bytes());
        same_user & same_pass
    }
}

fn eq_bytes(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Parses the `username:password` form used on the command line.
impl FromStr for Credentials {
    type Err = Error;

    fn from_str(userpass: &str) -> Result<Self, Self::Err> {
        let Some((username, password)) = userpass.split_once(':') else {
            return Err(Error::InvalidValue {
                field: "status_api.credentials",
                reason: "expected `username:password`".to_owned(),
            });
        };

        Ok(Self {
            username: username.to_owned(),
            password: password.to_owned(),
        })
    }
}
