#![deny(missing_docs)]
//! Logging for the resource tracker workspace.
//!
//! Crates log through the `tracker_*` macros. Binaries pick their sinks with
//! [`init`]; tests call [`initialize_for_tests`].

use std::fs::File;
use std::io;
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Logs a trace-level message.
#[macro_export]
macro_rules! tracker_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message.
#[macro_export]
macro_rules! tracker_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message.
#[macro_export]
macro_rules! tracker_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message.
#[macro_export]
macro_rules! tracker_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message.
#[macro_export]
macro_rules! tracker_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// A destination for log records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    /// The terminal's stderr; stdout stays free for rendered output.
    Stderr,
    /// A file, truncated when logging starts.
    File(PathBuf),
}

/// Installs the global logger writing to every sink at `level`.
///
/// Fails only when a log file cannot be created. A logger that was already
/// installed is left in place.
pub fn init(sinks: &[LogSink], level: LevelFilter) -> io::Result<()> {
    let loggers = build_loggers(sinks, level)?;
    if !loggers.is_empty() {
        let _ = CombinedLogger::init(loggers);
    }
    Ok(())
}

fn build_loggers(sinks: &[LogSink], level: LevelFilter) -> io::Result<Vec<Box<dyn SharedLogger>>> {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();

    sinks
        .iter()
        .map(|sink| {
            let logger: Box<dyn SharedLogger> = match sink {
                LogSink::Stderr => {
                    TermLogger::new(level, config.clone(), TerminalMode::Stderr, ColorChoice::Auto)
                }
                LogSink::File(path) => WriteLogger::new(level, config.clone(), File::create(path)?),
            };
            Ok(logger)
        })
        .collect()
}

/// Initializes a stderr logger for tests; no-ops if a logger already exists.
pub fn initialize_for_tests() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Never,
    )]);
}
