/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::str::FromStr;

use slog::Level;
use thiserror::Error;

/// Log severity, ordered from the most verbose to the least verbose.
///
/// The numeric index of each variant is part of the public interface, callers
/// may select a severity by index, see [`Severity::from_index`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Fatal,
    Panic,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid severity index {0}, the max allowed value is {max}", max = Severity::ALL.len() - 1)]
pub struct SeverityIndexError(pub usize);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown severity name {0}")]
pub struct SeverityParseError(pub String);

impl Severity {
    pub const ALL: [Severity; 7] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
        Severity::Panic,
    ];

    pub fn from_index(index: usize) -> Result<Self, SeverityIndexError> {
        Severity::ALL
            .get(index)
            .copied()
            .ok_or(SeverityIndexError(index))
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Trace => "trace",
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
            Severity::Panic => "panic",
        }
    }

    /// slog has no distinct panic level, both fatal and panic map to critical
    pub const fn as_slog(self) -> Level {
        match self {
            Severity::Trace => Level::Trace,
            Severity::Debug => Level::Debug,
            Severity::Info => Level::Info,
            Severity::Warn => Level::Warning,
            Severity::Error => Level::Error,
            Severity::Fatal | Severity::Panic => Level::Critical,
        }
    }

    pub const fn from_slog(level: Level) -> Self {
        match level {
            Level::Trace => Severity::Trace,
            Level::Debug => Severity::Debug,
            Level::Info => Severity::Info,
            Level::Warning => Severity::Warn,
            Level::Error => Severity::Error,
            Level::Critical => Severity::Fatal,
        }
    }

    /// Check if a slog record level passes this severity as a threshold.
    pub fn allows(self, level: Level) -> bool {
        level.is_at_least(self.as_slog())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = SeverityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Severity::Trace),
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            "fatal" | "critical" => Ok(Severity::Fatal),
            "panic" => Ok(Severity::Panic),
            _ => Err(SeverityParseError(s.to_string())),
        }
    }
}
