//! Error decorator that keeps the source location where an error was raised.
//!
//! Backend failures in `montorrent` surface far away from where they happen:
//! a single status request fans out into dozens of remote calls. Wrapping the
//! original error together with the caller location makes the log line point
//! at the step that failed.
//!
//! ```rust
//! use montorrent_located_error::{Located, LocatedError};
//!
//! #[derive(thiserror::Error, Debug)]
//! enum BackendError {
//!     #[error("connection refused")]
//!     Refused,
//! }
//!
//! let err: LocatedError<BackendError> = Located(BackendError::Refused).into();
//!
//! assert!(err.to_string().starts_with("connection refused, "));
//! assert!(err.to_string().contains("src/lib.rs"));
//! ```
use std::error::Error;
use std::panic::Location;
use std::sync::Arc;

use tracing::debug;

/// A shareable, type-erased error.
pub type DynError = Arc<dyn std::error::Error + Send + Sync>;

/// Marker wrapper used to turn any error into a [`LocatedError`] with `.into()`.
pub struct Located<E>(pub E);

/// An error together with the location of the code that raised it.
///
/// Cloning is cheap: the source is reference counted.
#[derive(Debug)]
pub struct LocatedError<'a, E>
where
    E: Error + ?Sized + Send + Sync,
{
    source: Arc<E>,
    location: Box<Location<'a>>,
}

impl<'a, E> LocatedError<'a, E>
where
    E: Error + ?Sized + Send + Sync,
{
    /// The location where the error was wrapped.
    #[must_use]
    pub fn location(&self) -> &Location<'a> {
        &self.location
    }

    /// The wrapped error.
    #[must_use]
    pub fn inner(&self) -> &E {
        &self.source
    }
}

impl<'a, E> std::fmt::Display for LocatedError<'a, E>
where
    E: Error + ?Sized + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.source, self.location)
    }
}

impl<'a, E> Error for LocatedError<'a, E>
where
    E: Error + ?Sized + Send + Sync + 'static,
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

impl<'a, E> Clone for LocatedError<'a, E>
where
    E: Error + ?Sized + Send + Sync,
{
    fn clone(&self) -> Self {
        LocatedError {
            source: self.source.clone(),
            location: self.location.clone(),
        }
    }
}

// `Into` instead of `From`: only a direct `#[track_caller]` impl reports the
// location of the `.into()` call.
#[allow(clippy::from_over_into)]
impl<'a, E> Into<LocatedError<'a, E>> for Located<E>
where
    E: Error + Send + Sync,
{
    #[track_caller]
    fn into(self) -> LocatedError<'a, E> {
        let err = LocatedError {
            source: Arc::new(self.0),
            location: Box::new(*Location::caller()),
        };
        debug!("{err}");
        err
    }
}

#[allow(clippy::from_over_into)]
impl<'a> Into<LocatedError<'a, dyn std::error::Error + Send + Sync>> for DynError {
    #[track_caller]
    fn into(self) -> LocatedError<'a, dyn std::error::Error + Send + Sync> {
        LocatedError {
            source: self,
            location: Box::new(*Location::caller()),
        }
    }
}
