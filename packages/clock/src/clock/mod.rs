use std::time::Duration;

use self::stopped::StoppedClock;
use self::working::WorkingClock;
use crate::DurationSinceUnixEpoch;

pub mod stopped;
pub mod working;

/// A clock is either the working clock (production) or the stopped clock
/// (testing). Both implement [`Time`].
#[derive(Debug)]
pub struct Clock<T> {
    clock: std::marker::PhantomData<T>,
}

/// The working clock. It returns the current system time.
pub type Working = Clock<WorkingClock>;
/// The stopped clock. It only moves when a test moves it.
pub type Stopped = Clock<StoppedClock>;

/// Trait for types that can be used as a timestamp clock.
pub trait Time: Sized {
    fn now() -> DurationSinceUnixEpoch;

    fn dbg_clock_type() -> String;

    #[must_use]
    fn now_add(add_time: &Duration) -> Option<DurationSinceUnixEpoch> {
        Self::now().checked_add(*add_time)
    }

    #[must_use]
    fn now_sub(sub_time: &Duration) -> Option<DurationSinceUnixEpoch> {
        Self::now().checked_sub(*sub_time)
    }
}
