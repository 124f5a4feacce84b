//! Status API.
//!
//! An HTTP server that publishes the progress of every rtorrent download as a
//! single JSON document.
//!
//! # Endpoints
//!
//! - [Status](#status)
//! - [Health Check](#health-check)
//!
//! # Status
//!
//! `GET /`
//!
//! Any path other than `/health_check` returns the status too.
//!
//! **Example request**
//!
//! ```bash
//! curl "http://127.0.0.1:8080/"
//! ```
//!
//! **Example response** `200`
//!
//! The snapshot is keyed by info-hash, the keys are sorted, and the document
//! is indented with tabs and ends with a new line.
//!
//! ```json
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
//! Whether rtorrent is polled for every request depends on the cache window
//! (`status_api.cache_secs`). See [`CacheGate`](crate::core::cache::CacheGate).
//!
//! **Example response** `500`
//!
//! When rtorrent cannot be polled the response only says which step failed.
//! The details are logged.
//!
//! ```text
//! could not get torrents list
//! ```
//!
//! # Health Check
//!
//! `GET /health_check`
//!
//! It never polls rtorrent and never requires authentication.
//!
//! ```json
//! {"status":"Ok"}
//! ```
//!
//! # Authentication
//!
//! When the configuration has `status_api.credentials`, every endpoint but
//! the health check requires HTTP basic authentication:
//!
//! ```toml
//! [status_api.credentials]
//! username = "admin"
//! password = "MyPassword"
//! ```
//!
//! ```bash
//! curl -u admin:MyPassword "http://127.0.0.1:8080/"
//! ```
//!
//! Requests without valid credentials get a `401` with a
//! `WWW-Authenticate: Basic realm="montorrent"` header.
pub mod handlers;
pub mod middlewares;
pub mod resources;
pub mod responses;
pub mod routes;
pub mod server;

pub const STATUS_API_LOG_TARGET: &str = "STATUS API";

/// Value of the `Server` header of every response.
pub const SERVER_ID: &str = concat!("montorrent/", env!("CARGO_PKG_VERSION"));
