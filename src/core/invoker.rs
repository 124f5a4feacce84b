//! Remote call invoker with a retry budget.
//!
//! rtorrent's control channel sometimes answers with nothing at all (an early
//! EOF) when it is busy. The [`Invoker`] absorbs those hiccups: a call is
//! attempted up to `retry_budget` times, waiting `retry_delay` between two
//! attempts, until one of them returns a non-empty answer.
//!
//! A failing attempt (transport error) and an empty answer are handled the
//! same way. That also means an rtorrent that is down is only reported after
//! the whole budget is spent: `(retry_budget - 1) * retry_delay`, about 38
//! seconds with the defaults.
use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::backend::RemoteBackend;
use super::error::Error;

pub const BACKEND_LOG_TARGET: &str = "BACKEND";

/// Runs remote calls through a [`RemoteBackend`], retrying empty or failing
/// attempts.
#[derive(Clone)]
pub struct Invoker {
    backend: Arc<dyn RemoteBackend>,
    retry_budget: u32,
    retry_delay: Duration,
}

impl Invoker {
    #[must_use]
    pub fn new(backend: Arc<dyn RemoteBackend>, retry_budget: u32, retry_delay: Duration) -> Self {
        Self {
            backend,
            retry_budget,
            retry_delay,
        }
    }

    /// Returns the first non-empty answer to `operation` for `target`.
    ///
    /// # Errors
    ///
    /// Will return `Error::EmptyAnswer` if no attempt produced a non-empty
    /// answer.
    pub async fn invoke(&self, operation: &str, target: &str) -> Result<Vec<u8>, Error> {
        for attempt in 1..=self.retry_budget {
            match self.backend.invoke(operation, target).await {
                Ok(answer) if !answer.is_empty() => return Ok(answer),
                Ok(_) => {
                    debug!(target: BACKEND_LOG_TARGET, operation, target, attempt, "empty answer");
                }
                Err(err) => {
                    debug!(target: BACKEND_LOG_TARGET, operation, target, attempt, "ignoring error: {err}");
                }
            }

            if attempt < self.retry_budget {
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        Err(Error::EmptyAnswer {
            operation: operation.to_owned(),
            target: target.to_owned(),
            attempts: self.retry_budget,
            location: Location::caller(),
        })
    }
}
