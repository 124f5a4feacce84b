//! Time source for `montorrent`.
//!
//! The status cache decides whether a snapshot is still fresh by comparing
//! the capture time with "now". Reading "now" through the [`clock::Time`]
//! trait lets production code use the system clock while tests freeze and
//! advance time at will.
//!
//! Clocks return a [`DurationSinceUnixEpoch`], a plain timestamp that does not
//! depend on the time zone of the host.
//!
//! ```text
//! Universal time: 2024-03-27 15:12:00 UTC
//! Timestamp:      1711552320
//! ```
pub mod clock;
pub mod static_time;

#[macro_use]
extern crate lazy_static;

/// Duration since the Unix Epoch.
pub type DurationSinceUnixEpoch = std::time::Duration;

/// This code needs to be copied into each crate.
/// Working version, for production.
#[cfg(not(test))]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Working;

/// Stopped version, for testing.
#[cfg(test)]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Stopped;
