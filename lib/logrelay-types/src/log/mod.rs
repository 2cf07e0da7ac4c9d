/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

mod severity;
pub use severity::{Severity, SeverityIndexError, SeverityParseError};

mod level_set;
pub use level_set::LevelSet;

mod hook;
pub use hook::{ArcLogHook, LogHook};

mod stats;
pub use stats::{LogSnapshot, LogStats};

mod json;
pub use json::{JsonKvCollector, collect_kv_json};

#[cfg(feature = "async-log")]
mod async_log;
#[cfg(feature = "async-log")]
pub use async_log::{AsyncLogConfig, AsyncLogFormatter, AsyncLogger};
