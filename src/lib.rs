//! **montorrent** serves the download progress of an
//! [rtorrent](https://github.com/rakshasa/rtorrent) instance as JSON over HTTP.
//!
//! # Table of contents
//!
//! - [Features](#features)
//! - [Services](#services)
//! - [Installation](#installation)
//! - [Configuration](#configuration)
//! - [Usage](#usage)
//! - [Components](#components)
//!
//! # Features
//!
//! - [x] Name, bytes done, bytes left, total size and completion percentage of
//!   every download.
//! - [x] Optional cache window, so rtorrent is not polled on every request.
//! - [x] A single backend poll for any number of concurrent requests.
//! - [x] Retries for the empty answers rtorrent gives when it is busy.
//! - [x] Two ways to reach rtorrent: an external XML-RPC client
//!   (`rtorrentrpc`) or its SCGI port directly.
//! - [x] Optional HTTPS and HTTP basic authentication.
//!
//! # Services
//!
//! - [Status API](crate::servers::status_api): `GET /` returns the status of
//!   every download, `GET /health_check` tells whether the server is up.
//!
//! # Installation
//!
//! ```text
//! git clone https://github.com/mpl/montorrent.git
//! cd montorrent
//! cargo build --release
//! ```
//!
//! With the default `command` backend the `rtorrentrpc` client must be in the
//! `PATH`. The `scgi` backend does not need it.
//!
//! # Configuration
//!
//! The configuration is a TOML file, by default
//! `./share/default/config/montorrent.development.toml`. A missing file means
//! the defaults:
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
//! Refer to the [`montorrent-configuration`](montorrent_configuration) crate
//! for the env vars that override the file.
//!
//! # Usage
//!
//! ```text
//! montorrent --cache 30 --host localhost:8080 --scgi localhost:5000 --userpass admin:MyPassword
//! ```
//!
//! ```text
//! $ curl -u admin:MyPassword "http://localhost:8080/"
//! {
//! 	"ABC123": {
//! 		"Name": "My Movie",
//! 		"BytesDone": 500,
//! 		"BytesLeft": 500,
//! 		"BytesTotal": 1000,
//! 		"PercentDone": 50
//! 	}
//! }
//! ```
//!
//! # Components
//!
//! - [`core`]: the status pipeline, from the rtorrent RPCs to the cached
//!   snapshot.
//! - [`servers`]: the HTTP server that publishes the snapshot.
//! - [`bootstrap`]: configuration, logging and jobs.
//! - [`app`]: starts the jobs.
use montorrent_clock::clock;

pub mod app;
pub mod bootstrap;
pub mod core;
pub mod servers;

/// This code needs to be copied into each crate.
/// Working version, for production.
#[cfg(not(test))]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Working;

/// Stopped version, for testing.
#[cfg(test)]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Stopped;
