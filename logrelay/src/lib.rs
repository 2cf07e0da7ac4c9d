/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

mod output;
pub use output::LogOutput;
use output::OutputDrain;

mod hook;
pub use hook::{HookError, HookInfo, HookStatus};

mod report;

mod handle;
pub use handle::{LoggerHandle, LoggerHandleBuilder};

pub mod registry;

mod init;
pub use init::{init_logger, init_logger_with};

mod install;
pub use install::{add_logstash_hook, add_logstash_hook_to, add_sentry_hook, add_sentry_hook_to};

mod config;
pub use config::{FacilityConfig, FacilityInstall, LogstashHookConfig};

pub mod bridge;

pub use logrelay_logstash::{LogstashClientConfig, Transport};
pub use logrelay_sentry::{SentryClient, SentryClientConfig, SentryDsn, SentryTransport};
pub use logrelay_types::log::{
    ArcLogHook, LevelSet, LogHook, LogSnapshot, Severity, SeverityIndexError,
};
