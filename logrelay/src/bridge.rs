/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

//! Forward records of the `log` crate to the published logger handle.

use log::{LevelFilter, Metadata, SetLoggerError};

use logrelay_types::log::Severity;

use super::registry;

fn severity_of(level: log::Level) -> Severity {
    match level {
        log::Level::Error => Severity::Error,
        log::Level::Warn => Severity::Warn,
        log::Level::Info => Severity::Info,
        log::Level::Debug => Severity::Debug,
        log::Level::Trace => Severity::Trace,
    }
}

struct LogBridge;

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        let level = severity_of(metadata.level()).as_slog();
        registry::get().level().allows(level)
    }

    fn log(&self, record: &log::Record) {
        let handle = registry::get();
        let level = severity_of(record.level()).as_slog();
        if !handle.level().allows(level) {
            return;
        }
        // `slog::log!` needs a constant level, so dispatch per level.
        macro_rules! emit {
            ($lvl:expr) => {
                slog::log!(
                    handle.logger(),
                    $lvl,
                    "",
                    "{}",
                    record.args();
                    "target" => record.target()
                )
            };
        }
        match level {
            slog::Level::Critical => emit!(slog::Level::Critical),
            slog::Level::Error => emit!(slog::Level::Error),
            slog::Level::Warning => emit!(slog::Level::Warning),
            slog::Level::Info => emit!(slog::Level::Info),
            slog::Level::Debug => emit!(slog::Level::Debug),
            slog::Level::Trace => emit!(slog::Level::Trace),
        }
    }

    fn flush(&self) {}
}

/// Install the bridge as the global `log` logger.
///
/// Filtering is left to the handle published at the time of each record.
pub fn init_log_bridge() -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(LogBridge))?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}
