//! The status aggregation pipeline.
//!
//! This is the part of `montorrent` that talks to rtorrent and turns its
//! answers into a [`StatusSnapshot`](listing::StatusSnapshot). It does not
//! know anything about HTTP: the [status API](crate::servers::status_api)
//! only calls [`CacheGate::get_snapshot`](cache::CacheGate::get_snapshot).
//!
//! The pipeline, from the outside in:
//!
//! ```text
//! CacheGate          one snapshot per cache window, one refresh at a time
//!   └ listing        download_list, then one status per download
//!       └ status     d.name + d.get_bytes_done + d.get_left_bytes
//!           └ fields first matching line of each answer
//!               └ Invoker      retries empty or failing calls
//!                   └ RemoteBackend  command line client or SCGI
//! ```
//!
//! Every RPC has a single string argument: the download hash, or an empty
//! string for `download_list`. Answers are scanned line by line (see
//! [`scanner`]) instead of being parsed as XML.
//!
//! # Example
//!
//! Given these answers from rtorrent:
//!
//! RPC | Answer line
//! ---|---
//! `download_list` | `<value><string>ABC123</string></value>`
//! `d.name ABC123` | `<param><value><string>My Movie</string></value></param>`
//! `d.get_bytes_done ABC123` | `<param><value><i8>500</i8></value></param>`
//! `d.get_left_bytes ABC123` | `<param><value><i8>500</i8></value></param>`
//!
//! the snapshot is:
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
pub mod backend;
pub mod cache;
pub mod error;
pub mod fields;
pub mod invoker;
pub mod listing;
pub mod scanner;
pub mod status;
