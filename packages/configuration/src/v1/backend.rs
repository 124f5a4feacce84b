use std::time::Duration;

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// How `montorrent` talks to rtorrent.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy, Display)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Spawn an external XML-RPC client (`rtorrentrpc` by default) for every call.
    #[display("command")]
    Command,
    /// Speak XML-RPC over SCGI to rtorrent directly.
    #[display("scgi")]
    Scgi,
}

/// Configuration for the rtorrent backend.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Backend {
    /// See [`BackendKind`].
    #[serde(default = "Backend::default_kind")]
    pub kind: BackendKind,

    /// The `host:port` of rtorrent's SCGI listener (`network.scgi.open_port`).
    #[serde(default = "Backend::default_scgi_address")]
    pub scgi_address: String,

    /// The program used by the `command` backend. It is invoked as
    /// `<program> <scgi_address> <operation> <target>`.
    #[serde(default = "Backend::default_program")]
    pub program: String,

    /// Maximum number of attempts for a single remote call.
    ///
    /// rtorrent sometimes answers with an empty response when it is busy, so
    /// calls are retried until they return something.
    #[serde(default = "Backend::default_retry_budget")]
    pub retry_budget: u32,

    /// Seconds to wait between two attempts of the same remote call.
    #[serde(default = "Backend::default_retry_delay_secs")]
    pub retry_delay_secs: u64,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            kind: Self::default_kind(),
            scgi_address: Self::default_scgi_address(),
            program: Self::default_program(),
            retry_budget: Self::default_retry_budget(),
            retry_delay_secs: Self::default_retry_delay_secs(),
        }
    }
}

impl Backend {
    fn default_kind() -> BackendKind {
        BackendKind::Command
    }

    fn default_scgi_address() -> String {
        "localhost:5000".to_owned()
    }

    fn default_program() -> String {
        "rtorrentrpc".to_owned()
    }

    fn default_retry_budget() -> u32 {
        20
    }

    fn default_retry_delay_secs() -> u64 {
        2
    }

    #[must_use]
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }
}
