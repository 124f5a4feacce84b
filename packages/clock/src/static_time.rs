//! The time the application started.
use std::time::SystemTime;

lazy_static! {
    /// Captured the first time it is read, so it should be initialized during bootstrap.
    pub static ref TIME_AT_APP_START: SystemTime = SystemTime::now();
}
