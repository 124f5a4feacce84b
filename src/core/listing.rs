//! Status of every download.
//!
//! A listing pass asks rtorrent for the hashes of all its downloads
//! (`download_list`) and then aggregates the status of each one of them.
//!
//! The pass is all or nothing: the first download that fails aborts it and
//! the error is returned instead of a snapshot with missing entries.
use std::collections::BTreeMap;

use super::backend::NO_TARGET;
use super::error::Error;
use super::invoker::Invoker;
use super::scanner::{self, STRING_ITEM};
use super::status::{self, DownloadStatus, TargetId};

pub const LIST_OPERATION: &str = "download_list";

/// The status of every download, keyed by hash.
pub type StatusSnapshot = BTreeMap<TargetId, DownloadStatus>;

/// # Errors
///
/// Will return any error from the invoker or the scanner.
pub async fn list_targets(invoker: &Invoker) -> Result<Vec<TargetId>, Error> {
    let answer = invoker.invoke(LIST_OPERATION, NO_TARGET).await?;

    Ok(scanner::scan_with(LIST_OPERATION, &answer, STRING_ITEM)?
        .into_iter()
        .map(TargetId::from)
        .collect())
}

/// Runs a full listing pass.
///
/// # Errors
///
/// Will return the error of the listing call or of the first download whose
/// status cannot be aggregated.
pub async fn aggregate_all(invoker: &Invoker) -> Result<StatusSnapshot, Error> {
    let mut snapshot = StatusSnapshot::new();

    for target in list_targets(invoker).await? {
        let download = status::aggregate_status(invoker, &target).await?;
        snapshot.insert(target, download);
    }

    Ok(snapshot)
}
