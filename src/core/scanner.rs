//! Line scanner for rtorrent XML-RPC answers.
//!
//! rtorrent answers are XML documents, but every scalar value lands on its own
//! line wrapped in a fixed set of tags:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <methodResponse>
//! <params>
//! <param><value><array><data>
//! <value><string>2F8E3CA4B8D3C1C1D48A5E4B2F2B8B0A4C6E8D1A</string></value>
//! <value><string>9A41D0F0C0E4D29D1E2A1B4C6C8E0F2A4B6C8D0E</string></value>
//! </data></array></value></param>
//! </params>
//! </methodResponse>
//! ```
//!
//! So instead of parsing XML, [`scan`] keeps the lines that start and end with
//! the expected tags and returns what is in between.
use montorrent_located_error::Located;

use super::error::Error;

/// Prefix and suffix around a value in an answer line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    pub prefix: &'static str,
    pub suffix: &'static str,
}

/// A string item of an array, as in the `download_list` answer.
pub const STRING_ITEM: Delimiters = Delimiters {
    prefix: "<value><string>",
    suffix: "</string></value>",
};

/// A single string return value, as in the `d.name` answer.
pub const STRING_PARAM: Delimiters = Delimiters {
    prefix: "<param><value><string>",
    suffix: "</string></value></param>",
};

/// A single 8-byte integer return value, as in the `d.get_bytes_done` answer.
pub const I8_PARAM: Delimiters = Delimiters {
    prefix: "<param><value><i8>",
    suffix: "</i8></value></param>",
};

/// Returns the content between `prefix` and `suffix` of every line that has
/// both, in line order. Lines without them are skipped; no match at all is an
/// empty `Vec`, not an error.
///
/// `operation` is the rtorrent method that produced the answer.
///
/// # Errors
///
/// Will return `Error::Scan` if the answer is not valid UTF-8.
pub fn scan(operation: &str, answer: &[u8], prefix: &str, suffix: &str) -> Result<Vec<String>, Error> {
    let text = std::str::from_utf8(answer).map_err(|err| Error::Scan {
        operation: operation.to_owned(),
        source: Located(err).into(),
    })?;

    Ok(text
        .lines()
        .filter_map(|line| line.strip_prefix(prefix)?.strip_suffix(suffix))
        .map(ToOwned::to_owned)
        .collect())
}

/// [`scan`] with a predefined pair of [`Delimiters`].
///
/// # Errors
///
/// Will return `Error::Scan` if the answer is not valid UTF-8.
pub fn scan_with(operation: &str, answer: &[u8], delimiters: Delimiters) -> Result<Vec<String>, Error> {
    scan(operation, answer, delimiters.prefix, delimiters.suffix)
}
