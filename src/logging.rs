// src/logging.rs
//
// One line per event: `[hh:mm:ss.mmm][LEVEL] message`, elapsed since start.
// GUI writes to `.store/debug.log`; the CLI writes to stderr.
// `RUST_LOG` overrides the default `info` filter.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Instant;

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

use crate::config::consts::{LOG_FILE, STORE_DIR};

static START: OnceLock<Instant> = OnceLock::new();

fn start() -> Instant {
    *START.get_or_init(Instant::now)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogSink {
    File,
    Stderr,
}

pub fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

pub fn log_path() -> PathBuf {
    PathBuf::from(STORE_DIR).join(LOG_FILE)
}

fn open_log_file() -> io::Result<File> {
    fs::create_dir_all(STORE_DIR)?;
    OpenOptions::new().create(true).append(true).open(log_path())
}

/// Install the global logger. Safe to call more than once; later calls are ignored.
pub fn init(sink: LogSink) {
    start();

    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder
        .format(|buf, record| {
            let elapsed = fmt_elapsed(start().elapsed().as_millis());
            writeln!(buf, "[{elapsed}][{}] {}", record.level(), record.args())
        })
        // html5ever/selectors are chatty at debug
        .filter_module("html5ever", LevelFilter::Warn)
        .filter_module("selectors", LevelFilter::Warn)
        .filter_module("hyper_util", LevelFilter::Warn)
        .filter_module("rustls", LevelFilter::Warn);

    match sink {
        LogSink::File => match open_log_file() {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(file)));
            }
            Err(_) => {
                builder.target(Target::Stderr);
            }
        },
        LogSink::Stderr => {
            builder.target(Target::Stderr);
        }
    }

    let _ = builder.try_init();
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::log::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::log::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        ::log::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::log::error!($($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::fmt_elapsed;

    #[test]
    fn elapsed_is_zero_padded() {
        assert_eq!(fmt_elapsed(0), "00:00:00.000");
        assert_eq!(fmt_elapsed(3_723_004), "01:02:03.004");
    }
}
