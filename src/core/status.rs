//! Status of a single download.
//!
//! A [`DownloadStatus`] is built from the three fields rtorrent reports for a
//! download (name, bytes done and bytes left). The total size and the
//! completion percentage are derived from them:
//!
//! ```text
//! bytes_total  = bytes_done + bytes_left
//! percent_done = floor(bytes_done * 100 / bytes_total)
//! ```
//!
//! A download with a total size of zero bytes (a magnet link that has not
//! fetched its metadata yet, for example) has no meaningful percentage, and
//! building its status fails with `Error::ZeroSize`.
use std::panic::Location;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use super::error::Error;
use super::fields;
use super::invoker::Invoker;

/// The info-hash rtorrent uses to identify a download.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[serde(transparent)]
pub struct TargetId(String);

impl TargetId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TargetId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TargetId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Progress of one download at the time it was polled.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct DownloadStatus {
    pub name: String,
    pub bytes_done: u64,
    pub bytes_left: u64,
    pub bytes_total: u64,
    pub percent_done: u8,
}

impl DownloadStatus {
    /// # Errors
    ///
    /// Will return `Error::ZeroSize` if both byte counts are zero, or
    /// `Error::SizeOverflow` if their sum does not fit in a `u64`.
    #[track_caller]
    pub fn new(target: &TargetId, name: String, bytes_done: u64, bytes_left: u64) -> Result<Self, Error> {
        let bytes_total = bytes_done.checked_add(bytes_left).ok_or_else(|| Error::SizeOverflow {
            target: target.clone(),
            location: Location::caller(),
        })?;

        if bytes_total == 0 {
            return Err(Error::ZeroSize {
                target: target.clone(),
                location: Location::caller(),
            });
        }

        let percent = u128::from(bytes_done) * 100 / u128::from(bytes_total);

        Ok(Self {
            name,
            bytes_done,
            bytes_left,
            bytes_total,
            percent_done: u8::try_from(percent).unwrap_or(100),
        })
    }
}

/// Polls the three fields of `target`, in order, and builds its status.
///
/// # Errors
///
/// Will return the first error of the field extractors, without polling the
/// remaining fields, or an error from [`DownloadStatus::new`].
pub async fn aggregate_status(invoker: &Invoker, target: &TargetId) -> Result<DownloadStatus, Error> {
    let name = fields::name(invoker, target).await?;
    let bytes_done = fields::bytes_done(invoker, target).await?;
    let bytes_left = fields::bytes_left(invoker, target).await?;

    DownloadStatus::new(target, name, bytes_done, bytes_left)
}
