/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::anyhow;
use once_cell::sync::Lazy;
use slog::{Drain, Never, OwnedKVList, Record};

use logrelay_stdlog::StdLogger;
use logrelay_types::log::{AsyncLogConfig, LogStats};

const STDERR_THREAD_NAME: &str = "log-stderr";
const STDOUT_THREAD_NAME: &str = "log-stdout";

// one IO thread per stream, shared by all handles
static STDERR_LOGGER: Lazy<Arc<StdLogger>> = Lazy::new(|| {
    let async_conf = AsyncLogConfig::with_name(STDERR_THREAD_NAME);
    Arc::new(logrelay_stdlog::new_async_logger(&async_conf, false, false))
});
static STDOUT_LOGGER: Lazy<Arc<StdLogger>> = Lazy::new(|| {
    let async_conf = AsyncLogConfig::with_name(STDOUT_THREAD_NAME);
    Arc::new(logrelay_stdlog::new_async_logger(&async_conf, false, true))
});

/// The primary output of a logger handle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogOutput {
    #[default]
    Stderr,
    Stdout,
    Discard,
}

impl LogOutput {
    pub const fn as_str(&self) -> &'static str {
        match self {
            LogOutput::Stderr => "stderr",
            LogOutput::Stdout => "stdout",
            LogOutput::Discard => "discard",
        }
    }
}

impl fmt::Display for LogOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogOutput {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stderr" => Ok(LogOutput::Stderr),
            "stdout" => Ok(LogOutput::Stdout),
            "discard" | "null" => Ok(LogOutput::Discard),
            _ => Err(anyhow!("unsupported log output {s}")),
        }
    }
}

#[derive(Clone)]
pub(crate) enum OutputDrain {
    Std(Arc<StdLogger>),
    Discard,
}

impl OutputDrain {
    pub(crate) fn new(output: LogOutput) -> Self {
        match output {
            LogOutput::Stderr => OutputDrain::Std(Arc::clone(&STDERR_LOGGER)),
            LogOutput::Stdout => OutputDrain::Std(Arc::clone(&STDOUT_LOGGER)),
            LogOutput::Discard => OutputDrain::Discard,
        }
    }

    pub(crate) fn stats(&self) -> Option<Arc<LogStats>> {
        match self {
            OutputDrain::Std(d) => Some(d.stats()),
            OutputDrain::Discard => None,
        }
    }
}

impl Drain for OutputDrain {
    type Ok = ();
    type Err = Never;

    fn log(&self, record: &Record, logger_values: &OwnedKVList) -> Result<(), Never> {
        if let OutputDrain::Std(d) = self {
            // format errors are counted in the drain stats
            let _ = d.log(record, logger_values);
        }
        Ok(())
    }
}
