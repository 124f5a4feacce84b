use std::time::SystemTime;

use crate::clock;
use crate::DurationSinceUnixEpoch;

#[allow(clippy::module_name_repetitions)]
pub struct WorkingClock;

impl clock::Time for clock::Working {
    fn now() -> DurationSinceUnixEpoch {
        SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or(DurationSinceUnixEpoch::ZERO)
    }

    fn dbg_clock_type() -> String {
        "Working".to_owned()
    }
}
