//! Servers. Services that can be started and stopped.
pub mod logging;
pub mod signals;
pub mod status_api;
