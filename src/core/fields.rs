//! Per-download field extractors.
//!
//! Each field is one rtorrent RPC with the download hash as argument:
//!
//! Field | Operation | Answer line
//! ---|---|---
//! name | `d.name` | `<param><value><string>My Movie</string></value></param>`
//! bytes done | `d.get_bytes_done` | `<param><value><i8>500</i8></value></param>`
//! bytes left | `d.get_left_bytes` | `<param><value><i8>500</i8></value></param>`
//!
//! Only the first matching line is used.
use std::panic::Location;

use derive_more::Display;
use montorrent_located_error::Located;

use super::error::Error;
use super::invoker::Invoker;
use super::scanner::{self, Delimiters};
use super::status::TargetId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Field {
    #[display("name")]
    Name,
    #[display("bytes_done")]
    BytesDone,
    #[display("bytes_left")]
    BytesLeft,
}

impl Field {
    /// The rtorrent method that returns this field.
    #[must_use]
    pub fn operation(self) -> &'static str {
        match self {
            Field::Name => "d.name",
            Field::BytesDone => "d.get_bytes_done",
            Field::BytesLeft => "d.get_left_bytes",
        }
    }

    #[must_use]
    pub fn delimiters(self) -> Delimiters {
        match self {
            Field::Name => scanner::STRING_PARAM,
            Field::BytesDone | Field::BytesLeft => scanner::I8_PARAM,
        }
    }
}

/// # Errors
///
/// Will return `Error::NotFound` if the answer has no name, or any error from
/// the invoker or the scanner.
pub async fn name(invoker: &Invoker, target: &TargetId) -> Result<String, Error> {
    first_value(invoker, target, Field::Name).await
}

/// # Errors
///
/// Will return `Error::NotFound` if the answer has no value, `Error::Parse` if
/// it is not an unsigned integer, or any error from the invoker or the scanner.
pub async fn bytes_done(invoker: &Invoker, target: &TargetId) -> Result<u64, Error> {
    integer_value(invoker, target, Field::BytesDone).await
}

/// # Errors
///
/// Will return `Error::NotFound` if the answer has no value, `Error::Parse` if
/// it is not an unsigned integer, or any error from the invoker or the scanner.
pub async fn bytes_left(invoker: &Invoker, target: &TargetId) -> Result<u64, Error> {
    integer_value(invoker, target, Field::BytesLeft).await
}

async fn integer_value(invoker: &Invoker, target: &TargetId, field: Field) -> Result<u64, Error> {
    let value = first_value(invoker, target, field).await?;

    value.trim().parse::<u64>().map_err(|err| Error::Parse {
        target: target.clone(),
        field,
        source: Located(err).into(),
    })
}

async fn first_value(invoker: &Invoker, target: &TargetId, field: Field) -> Result<String, Error> {
    let answer = invoker.invoke(field.operation(), target.as_str()).await?;

    scanner::scan_with(field.operation(), &answer, field.delimiters())?
        .into_iter()
        .next()
        .ok_or_else(|| Error::NotFound {
            target: target.clone(),
            field,
            location: Location::caller(),
        })
}
