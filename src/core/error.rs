//! Errors returned by the status pipeline.
//!
//! Error | Raised by | Description
//! ---|---|---
//! `Transport` | Backend | rtorrent could not be reached, or the RPC client process failed.
//! `EmptyAnswer` | Invoker | Every attempt of a remote call failed or returned nothing.
//! `Scan` | Scanner | The answer is not a readable text stream.
//! `NotFound` | Field extractors | The answer is well formed but does not contain the field.
//! `Parse` | Field extractors | The field is there but it is not a valid integer.
//! `ZeroSize` | Status aggregator | The download has a total size of zero bytes.
//! `SizeOverflow` | Status aggregator | Bytes done plus bytes left does not fit in 64 bits.
//! `RefreshAborted` | Cache gate | The refresh task was cancelled before it finished.
//!
//! Errors are `Clone` so the outcome of a single refresh can be handed to
//! every request that was waiting for it.
use std::num::ParseIntError;
use std::panic::Location;

use montorrent_located_error::LocatedError;

use super::fields::Field;
use super::listing::LIST_OPERATION;
use super::status::TargetId;

#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    #[error("remote call `{operation}` for target {target:?} failed: {source}")]
    Transport {
        operation: String,
        target: String,
        source: LocatedError<'static, dyn std::error::Error + Send + Sync>,
    },

    #[error("empty answer for `{operation}` with target {target:?} after {attempts} attempts, {location}")]
    EmptyAnswer {
        operation: String,
        target: String,
        attempts: u32,
        location: &'static Location<'static>,
    },

    #[error("could not scan the answer of `{operation}`: {source}")]
    Scan {
        operation: String,
        source: LocatedError<'static, std::str::Utf8Error>,
    },

    #[error("{target}: {field} not found, {location}")]
    NotFound {
        target: TargetId,
        field: Field,
        location: &'static Location<'static>,
    },

    #[error("{target}: could not convert {field} to an integer: {source}")]
    Parse {
        target: TargetId,
        field: Field,
        source: LocatedError<'static, ParseIntError>,
    },

    #[error("{target}: total size is zero bytes, the completion percentage is undefined, {location}")]
    ZeroSize {
        target: TargetId,
        location: &'static Location<'static>,
    },

    #[error("{target}: total size overflows, {location}")]
    SizeOverflow {
        target: TargetId,
        location: &'static Location<'static>,
    },

    #[error("status refresh aborted: {source}")]
    RefreshAborted {
        source: LocatedError<'static, tokio::task::JoinError>,
    },
}

impl Error {
    /// Whether the error comes from the listing step of a pass rather than
    /// from the status of one of the downloads.
    ///
    /// An aborted refresh counts as a failed listing: it is not tied to any
    /// download.
    #[must_use]
    pub fn is_listing_failure(&self) -> bool {
        match self {
            Error::Transport { operation, .. } | Error::EmptyAnswer { operation, .. } | Error::Scan { operation, .. } => {
                operation == LIST_OPERATION
            }
            Error::NotFound { .. } | Error::Parse { .. } | Error::ZeroSize { .. } | Error::SizeOverflow { .. } => false,
            Error::RefreshAborted { .. } => true,
        }
    }
}
