//! Holds a small `date`-like program printing a timestamp through the `notecal` engine.
//!
//! Differences with `date`:
//! - prints one of three fixed forms (display, storage, time) instead of a `+FORMAT`
//! - Gregorian, Jalali and Hijri calendars selected with `--calendar`
//! - a Persian locale shows Jalali dates where Gregorian is selected (display form only)
//! - `--date` takes Unix milliseconds, RFC 3339 or a local ISO 8601 date and time only

use notecal::{
    DateEngine,
    service::{Clock, SystemClock},
};
use tracing::{Level, debug};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod arg_parser;
mod clap_helper;

use arg_parser::{Args, Output, When};
use clap_helper::Parse;

fn main() {
    let config = Args::parse();
    init_logging(config.debug);

    let engine = DateEngine::new(config.timezone.clone());
    let timestamp = match config.when {
        When::Now => SystemClock.now_millis(),
        When::Given(v) => v,
    };

    debug!(
        timestamp,
        calendar = %config.calendar,
        locale = %config.locale,
        effective = %DateEngine::effective_kind(config.calendar, &config.locale),
        "basis"
    );

    println!(
        "{}",
        match config.output {
            Output::Display => engine.format_for_display(timestamp, config.calendar, &config.locale),
            Output::Storage => engine.format_for_storage(timestamp, config.calendar),
            Output::Time => engine.current_time_string(timestamp),
        }
    );
}

/// Log to STDERR at `WARN`, or `DEBUG` with `--debug`, unless `RUST_LOG` says otherwise.
fn init_logging(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
