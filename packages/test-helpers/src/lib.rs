//! Testing helpers for `montorrent`.
pub mod configuration;
