//! The rtorrent RPC boundary.
//!
//! Everything the status pipeline knows about rtorrent goes through the
//! [`RemoteBackend`] trait: call a named XML-RPC method with a single target
//! argument and get the raw answer back.
//!
//! There are two implementations:
//!
//! - [`CommandBackend`](command::CommandBackend): spawns an external XML-RPC
//!   client (`rtorrentrpc`) for every call.
//! - [`ScgiBackend`](scgi::ScgiBackend): connects to rtorrent's SCGI port and
//!   speaks XML-RPC itself.
//!
//! The [`factory`] builds the one selected in the configuration.
pub mod command;
pub mod scgi;

use std::sync::Arc;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use montorrent_configuration::{Backend, BackendKind};

use super::error::Error;

/// Target used by the operations that do not act on a single download.
pub const NO_TARGET: &str = "";

/// A capability to run one rtorrent RPC.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RemoteBackend: Sync + Send {
    /// Runs `operation` with `target` as its only argument and returns the
    /// raw answer. An empty answer is not an error at this level.
    ///
    /// # Errors
    ///
    /// Will return `Error::Transport` if rtorrent cannot be reached.
    async fn invoke(&self, operation: &str, target: &str) -> Result<Vec<u8>, Error>;
}

/// It builds the backend selected in the configuration.
#[must_use]
pub fn factory(config: &Backend) -> Arc<dyn RemoteBackend> {
    match config.kind {
        BackendKind::Command => Arc::new(command::CommandBackend::new(
            config.program.clone(),
            config.scgi_address.clone(),
        )),
        BackendKind::Scgi => Arc::new(scgi::ScgiBackend::new(config.scgi_address.clone())),
    }
}
