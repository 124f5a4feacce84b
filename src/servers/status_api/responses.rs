//! Responses of the status API.
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, error, warn};

use super::STATUS_API_LOG_TARGET;
use crate::core::error::Error;
use crate::core::listing::StatusSnapshot;

/// Challenge sent with the `401` responses.
pub const BASIC_CHALLENGE: &str = "Basic realm=\"montorrent\"";

/// `200` response with the snapshot, indented with tabs.
#[must_use]
pub fn status_response(snapshot: &StatusSnapshot) -> Response {
    match to_tab_indented_json(snapshot) {
        Ok(body) => (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(err) => {
            error!(target: STATUS_API_LOG_TARGET, "could not json encode the status: {err}");
            internal_error_response("could not json encode")
        }
    }
}

/// `500` response for a failed status query. The body only says whether the
/// listing or a single download failed.
///
/// The error details are logged at the debug level only.
#[must_use]
pub fn status_error_response(err: &Error) -> Response {
    let reason = if err.is_listing_failure() {
        "could not get torrents list"
    } else {
        "could not get torrent status"
    };

    warn!(target: STATUS_API_LOG_TARGET, "{reason}");
    debug!(target: STATUS_API_LOG_TARGET, "{reason}: {err}");

    internal_error_response(reason)
}

#[must_use]
pub fn internal_error_response(reason: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        format!("{reason}\n"),
    )
        .into_response()
}

/// `401` response asking for basic authentication.
#[must_use]
pub fn unauthorized_response() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [
            (header::WWW_AUTHENTICATE, HeaderValue::from_static(BASIC_CHALLENGE)),
            (header::CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8")),
        ],
        "401 Unauthorized\n",
    )
        .into_response()
}

/// Pretty printed JSON with one tab per level and a trailing new line.
///
/// # Errors
///
/// Will return an error if `value` cannot be serialized.
pub fn to_tab_indented_json<T>(value: &T) -> Result<Vec<u8>, serde_json::Error>
where
    T: Serialize + ?Sized,
{
    let mut body = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut body, PrettyFormatter::with_indent(b"\t"));

    value.serialize(&mut serializer)?;
    body.push(b'\n');

    Ok(body)
}
