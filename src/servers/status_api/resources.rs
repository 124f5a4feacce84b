//! Resources of the status API.
//!
//! The status itself is the
//! [`StatusSnapshot`](crate::core::listing::StatusSnapshot), serialized as it
//! is. Only the health check has a resource of its own.
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Status {
    Ok,
    Error,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Report {
    pub status: Status,
}
