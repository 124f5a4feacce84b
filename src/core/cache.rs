//! Time windowed cache in front of the listing pass.
//!
//! Every HTTP request asks the [`CacheGate`] for a snapshot. The gate answers
//! from the last published [`CacheState`] while it is fresh, and runs a new
//! listing pass otherwise:
//!
//! ```text
//! fresh = window > 0 && now < captured_at + window
//! ```
//!
//! With a zero window nothing is ever fresh and every request polls rtorrent.
//!
//! Concurrency rules:
//!
//! - Readers of a fresh state only take a read lock. They never wait for a
//!   refresh in progress.
//! - Only one listing pass runs at a time. Requests that arrive while a pass
//!   is running wait for it and share its outcome, whether it is a snapshot
//!   or an error, instead of starting their own pass.
//! - The snapshot and its capture time are published together, behind a
//!   single `Arc`, so a reader never sees one without the other.
//! - A failed pass publishes nothing. The previous state stays in place.
//!
//! The pass runs in its own task. A request dropped by the HTTP layer does
//! not stop a backend poll in flight.
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use montorrent_clock::clock::Time;
use montorrent_clock::DurationSinceUnixEpoch;
use montorrent_located_error::Located;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use super::error::Error;
use super::invoker::Invoker;
use super::listing::{self, StatusSnapshot};
use crate::CurrentClock;

pub const CACHE_LOG_TARGET: &str = "CACHE";

/// A published snapshot and the time it was captured.
#[derive(Debug)]
pub struct CacheState {
    pub snapshot: Arc<StatusSnapshot>,
    pub captured_at: DurationSinceUnixEpoch,
}

impl CacheState {
    #[must_use]
    pub fn is_fresh(&self, window: Duration, now: DurationSinceUnixEpoch) -> bool {
        if window.is_zero() {
            return false;
        }

        self.captured_at
            .checked_add(window)
            .is_some_and(|expires_at| now < expires_at)
    }
}

type Outcome = Result<Arc<StatusSnapshot>, Error>;

struct Inner {
    invoker: Invoker,
    window: Duration,
    published: RwLock<Option<Arc<CacheState>>>,
    /// Held for the whole listing pass. It keeps the outcome of the last one.
    refresh: Mutex<Option<Outcome>>,
    completed_refreshes: AtomicU64,
}

/// Gate between the HTTP readers and the listing pass.
#[derive(Clone)]
pub struct CacheGate {
    inner: Arc<Inner>,
}

impl CacheGate {
    #[must_use]
    pub fn new(invoker: Invoker, window: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                invoker,
                window,
                published: RwLock::new(None),
                refresh: Mutex::new(None),
                completed_refreshes: AtomicU64::new(0),
            }),
        }
    }

    #[must_use]
    pub fn window(&self) -> Duration {
        self.inner.window
    }

    /// The current snapshot, refreshed first if it is missing or stale.
    ///
    /// # Errors
    ///
    /// Will return the error of the listing pass when a refresh was needed and
    /// it failed.
    pub async fn get_snapshot(&self) -> Result<Arc<StatusSnapshot>, Error> {
        let seen = self.inner.completed_refreshes.load(Ordering::Acquire);

        if let Some(snapshot) = self.inner.fresh_snapshot().await {
            debug!(target: CACHE_LOG_TARGET, "serving cached snapshot");
            return Ok(snapshot);
        }

        let inner = self.inner.clone();

        match tokio::spawn(async move { inner.refresh(seen).await }).await {
            Ok(outcome) => outcome,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(err) => Err(Error::RefreshAborted {
                source: Located(err).into(),
            }),
        }
    }

    /// The last successfully published state, if any.
    pub async fn published(&self) -> Option<Arc<CacheState>> {
        self.inner.published.read().await.clone()
    }
}

impl Inner {
    async fn fresh_snapshot(&self) -> Option<Arc<StatusSnapshot>> {
        let published = self.published.read().await;
        let state = published.as_ref()?;

        state
            .is_fresh(self.window, CurrentClock::now())
            .then(|| state.snapshot.clone())
    }

    /// Runs a listing pass unless one finished after `seen` was read, in
    /// which case its outcome is returned instead.
    async fn refresh(&self, seen: u64) -> Outcome {
        let mut last_outcome = self.refresh.lock().await;

        if self.completed_refreshes.load(Ordering::Acquire) != seen {
            if let Some(outcome) = last_outcome.as_ref() {
                debug!(target: CACHE_LOG_TARGET, "sharing the outcome of a concurrent refresh");
                return outcome.clone();
            }
        }

        debug!(target: CACHE_LOG_TARGET, "refreshing snapshot");

        let outcome = listing::aggregate_all(&self.invoker).await.map(Arc::new);

        match &outcome {
            Ok(snapshot) => {
                let state = CacheState {
                    snapshot: snapshot.clone(),
                    captured_at: CurrentClock::now(),
                };
                *self.published.write().await = Some(Arc::new(state));
                debug!(target: CACHE_LOG_TARGET, downloads = snapshot.len(), "snapshot published");
            }
            Err(err) => {
                debug!(target: CACHE_LOG_TARGET, "refresh failed, keeping the previous snapshot: {err}");
            }
        }

        *last_outcome = Some(outcome.clone());
        self.completed_refreshes.fetch_add(1, Ordering::Release);

        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::core::backend::RemoteBackend;
    use crate::core::error::Error;
    use crate::core::invoker::Invoker;

    const LATENCY: Duration = Duration::from_millis(100);

    /// An rtorrent with a single download that counts the listing passes it
    /// is asked for. Every answer takes `LATENCY` to arrive.
    #[derive(Default)]
    struct FakeRtorrent {
        listing_passes: AtomicUsize,
        down: AtomicBool,
    }

    impl FakeRtorrent {
        fn listing_passes(&self) -> usize {
            self.listing_passes.load(Ordering::SeqCst)
        }

        fn go_down(&self) {
            self.down.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl RemoteBackend for FakeRtorrent {
        async fn invoke(&self, operation: &str, _target: &str) -> Result<Vec<u8>, Error> {
            tokio::time::sleep(LATENCY).await;

            if operation == "download_list" {
                self.listing_passes.fetch_add(1, Ordering::SeqCst);
            }

            if self.down.load(Ordering::SeqCst) {
                return Ok(Vec::new());
            }

            let answer = match operation {
                "download_list" => "<value><string>ABC123</string></value>\n",
                "d.name" => "<param><value><string>My Movie</string></value></param>\n",
                _ => "<param><value><i8>500</i8></value></param>\n",
            };

            Ok(answer.as_bytes().to_vec())
        }
    }

    fn invoker(backend: &Arc<FakeRtorrent>) -> Invoker {
        let backend: Arc<dyn RemoteBackend> = backend.clone();
        Invoker::new(backend, 1, Duration::ZERO)
    }

    mod the_cache_state {
        use std::sync::Arc;
        use std::time::Duration;

        use crate::core::cache::CacheState;
        use crate::core::listing::StatusSnapshot;

        fn captured_at(secs: u64) -> CacheState {
            CacheState {
                snapshot: Arc::new(StatusSnapshot::new()),
                captured_at: Duration::from_secs(secs),
            }
        }

        #[test]
        fn it_should_be_fresh_before_the_window_expires() {
            assert!(captured_at(100).is_fresh(Duration::from_secs(10), Duration::from_secs(109)));
        }

        #[test]
        fn it_should_be_stale_once_the_window_expires() {
            assert!(!captured_at(100).is_fresh(Duration::from_secs(10), Duration::from_secs(110)));
        }

        #[test]
        fn it_should_never_be_fresh_with_a_zero_window() {
            assert!(!captured_at(100).is_fresh(Duration::ZERO, Duration::from_secs(100)));
        }
    }

    mod the_cache_gate {
        use std::sync::Arc;
        use std::time::Duration;

        use futures::future::join_all;
        use montorrent_clock::clock::stopped::Stopped as _;
        use montorrent_clock::clock::Time as _;

        use super::{invoker, FakeRtorrent};
        use crate::core::cache::CacheGate;
        use crate::core::error::Error;
        use crate::core::status::TargetId;
        use crate::CurrentClock;

        const WINDOW: Duration = Duration::from_secs(30);

        fn start_clock() {
            CurrentClock::local_set(&Duration::from_secs(1_700_000_000));
        }

        #[tokio::test(start_paused = true)]
        async fn it_should_poll_rtorrent_on_the_first_request() {
            start_clock();
            let rtorrent = Arc::new(FakeRtorrent::default());
            let gate = CacheGate::new(invoker(&rtorrent), WINDOW);

            let snapshot = gate.get_snapshot().await.unwrap();

            assert_eq!(rtorrent.listing_passes(), 1);
            assert_eq!(snapshot[&TargetId::from("ABC123")].percent_done, 50);

            let published = gate.published().await.unwrap();
            assert_eq!(published.captured_at, CurrentClock::now());
            assert!(Arc::ptr_eq(&published.snapshot, &snapshot));
        }

        #[tokio::test(start_paused = true)]
        async fn it_should_serve_the_cached_snapshot_while_it_is_fresh() {
            start_clock();
            let rtorrent = Arc::new(FakeRtorrent::default());
            let gate = CacheGate::new(invoker(&rtorrent), WINDOW);

            let first = gate.get_snapshot().await.unwrap();
            CurrentClock::local_add(&(WINDOW - Duration::from_secs(1))).unwrap();
            let second = gate.get_snapshot().await.unwrap();

            assert_eq!(rtorrent.listing_passes(), 1);
            assert!(Arc::ptr_eq(&first, &second));
        }

        #[tokio::test(start_paused = true)]
        async fn it_should_refresh_the_snapshot_once_the_window_expires() {
            start_clock();
            let rtorrent = Arc::new(FakeRtorrent::default());
            let gate = CacheGate::new(invoker(&rtorrent), WINDOW);

            let first = gate.get_snapshot().await.unwrap();
            CurrentClock::local_add(&WINDOW).unwrap();
            let second = gate.get_snapshot().await.unwrap();

            assert_eq!(rtorrent.listing_passes(), 2);
            assert!(!Arc::ptr_eq(&first, &second));
            assert_eq!(first, second);
        }

        #[tokio::test(start_paused = true)]
        async fn it_should_poll_rtorrent_on_every_request_with_a_zero_window() {
            start_clock();
            let rtorrent = Arc::new(FakeRtorrent::default());
            let gate = CacheGate::new(invoker(&rtorrent), Duration::ZERO);

            gate.get_snapshot().await.unwrap();
            gate.get_snapshot().await.unwrap();
            gate.get_snapshot().await.unwrap();

            assert_eq!(rtorrent.listing_passes(), 3);
        }

        #[tokio::test(start_paused = true)]
        async fn concurrent_requests_should_share_a_single_listing_pass() {
            start_clock();
            let rtorrent = Arc::new(FakeRtorrent::default());
            let gate = CacheGate::new(invoker(&rtorrent), WINDOW);

            let snapshots = join_all((0..10).map(|_| gate.get_snapshot())).await;

            assert_eq!(rtorrent.listing_passes(), 1);
            let first = snapshots[0].as_ref().unwrap();
            for snapshot in &snapshots {
                assert!(Arc::ptr_eq(first, snapshot.as_ref().unwrap()));
            }
        }

        #[tokio::test(start_paused = true)]
        async fn concurrent_requests_should_share_a_single_listing_pass_even_with_a_zero_window() {
            start_clock();
            let rtorrent = Arc::new(FakeRtorrent::default());
            let gate = CacheGate::new(invoker(&rtorrent), Duration::ZERO);

            let snapshots = join_all((0..10).map(|_| gate.get_snapshot())).await;

            assert_eq!(rtorrent.listing_passes(), 1);
            assert!(snapshots.iter().all(Result::is_ok));
        }

        #[tokio::test(start_paused = true)]
        async fn concurrent_requests_should_share_the_error_of_a_failed_pass() {
            start_clock();
            let rtorrent = Arc::new(FakeRtorrent::default());
            rtorrent.go_down();
            let gate = CacheGate::new(invoker(&rtorrent), WINDOW);

            let outcomes = join_all((0..5).map(|_| gate.get_snapshot())).await;

            assert_eq!(rtorrent.listing_passes(), 1);
            assert!(outcomes
                .iter()
                .all(|outcome| matches!(outcome, Err(Error::EmptyAnswer { .. }))));
        }

        #[tokio::test(start_paused = true)]
        async fn a_failed_refresh_should_keep_the_previous_snapshot_published() {
            start_clock();
            let rtorrent = Arc::new(FakeRtorrent::default());
            let gate = CacheGate::new(invoker(&rtorrent), WINDOW);

            let snapshot = gate.get_snapshot().await.unwrap();
            let captured_at = CurrentClock::now();

            CurrentClock::local_add(&WINDOW).unwrap();
            rtorrent.go_down();

            assert!(gate.get_snapshot().await.is_err());

            let published = gate.published().await.unwrap();
            assert!(Arc::ptr_eq(&published.snapshot, &snapshot));
            assert_eq!(published.captured_at, captured_at);
        }

        #[tokio::test(start_paused = true)]
        async fn a_failed_refresh_should_be_retried_by_the_next_request() {
            start_clock();
            let rtorrent = Arc::new(FakeRtorrent::default());
            rtorrent.go_down();
            let gate = CacheGate::new(invoker(&rtorrent), WINDOW);

            assert!(gate.get_snapshot().await.is_err());
            assert!(gate.get_snapshot().await.is_err());

            assert_eq!(rtorrent.listing_passes(), 2);
            assert!(gate.published().await.is_none());
        }
    }
}
