//! Opt-in file logger for hosts that do not install their own tracing
//! subscriber.
//!
//! The engine only emits `tracing` events; it never installs a subscriber
//! on its own. Call [`init_logger`] from the host process to capture those
//! events in a timestamped file, or install any other subscriber instead.

use std::fs::File;

use time::{format_description, OffsetDateTime, UtcOffset};
use tracing::{subscriber::set_global_default, Level};
use tracing_subscriber::{fmt::writer::BoxMakeWriter, FmtSubscriber};

/// Install a global subscriber writing to a timestamped log file in the
/// working directory. Will panic on error.
pub fn init_logger(max_level: Level) {
    let file = File::create(log_file_name()).expect("could not create log file");
    let writer = BoxMakeWriter::new(file);
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let timer = tracing_subscriber::fmt::time::OffsetTime::new(
        offset,
        format_description::parse("[year]-[month]-[day] [hour]:[minute]:[second]")
            .expect("valid time format"),
    );

    let subscriber = FmtSubscriber::builder()
        .with_max_level(max_level)
        .with_ansi(false)
        .with_timer(timer)
        .with_writer(writer)
        .finish();

    set_global_default(subscriber).expect(
        "could not set global default tracing subscriber; skip init_logger if the host already sets one",
    );
}

fn log_file_name() -> String {
    let format =
        format_description::parse("courtside_[year][month][day]_[hour][minute][second].log")
            .expect("valid file name format");
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    now.format(&format).expect("time is formattable")
}
