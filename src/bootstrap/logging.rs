//! Setup for the application logging.
//!
//! It redirects the log info to the standard output with the threshold
//! defined in the configuration.
//!
//! - `off`
//! - `error`
//! - `warn`
//! - `info`
//! - `debug`
//! - `trace`
//!
//! With `off` no subscriber is installed at all.
use std::sync::Once;

use montorrent_configuration::{Configuration, Threshold};
use tracing::info;
use tracing::level_filters::LevelFilter;

static INIT: Once = Once::new();

/// It redirects the log info to the standard output with the threshold
/// defined in the configuration.
pub fn setup(cfg: &Configuration) {
    let tracing_level = map_to_tracing_level_filter(&cfg.logging.threshold);

    if tracing_level == LevelFilter::OFF {
        return;
    }

    INIT.call_once(|| {
        tracing_stdout_init(tracing_level);
    });
}

pub(crate) fn map_to_tracing_level_filter(threshold: &Threshold) -> LevelFilter {
    match threshold {
        Threshold::Off => LevelFilter::OFF,
        Threshold::Error => LevelFilter::ERROR,
        Threshold::Warn => LevelFilter::WARN,
        Threshold::Info => LevelFilter::INFO,
        Threshold::Debug => LevelFilter::DEBUG,
        Threshold::Trace => LevelFilter::TRACE,
    }
}

fn tracing_stdout_init(filter: LevelFilter) {
    let () = tracing_subscriber::fmt().with_max_level(filter).with_ansi(true).init();

    info!("Logging initialized");
}
