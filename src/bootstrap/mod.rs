//! Application bootstrapping.
//!
//! This module includes all the functions to build the application, its
//! dependencies, and run the jobs.
//!
//! There is a single job: the [status API](crate::servers::status_api)
//! server. Everything it needs, the rtorrent backend, the invoker and the
//! status cache, is built once here and shared with it.
pub mod app;
pub mod config;
pub mod jobs;
pub mod logging;
