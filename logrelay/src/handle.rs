/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use slog::{Drain, Level, Logger, Never, OwnedKVList, Record, o};

use logrelay_types::log::{ArcLogHook, LogSnapshot, Severity};

use super::report::{
    HOOK_ERROR_SAMPLING_OFFSET_DEFAULT, HOOK_ERROR_SAMPLING_OFFSET_MAX, ReportHookError,
};
use super::{HookInfo, LogOutput, OutputDrain};

struct HandleCore {
    level: Severity,
    output: LogOutput,
    output_drain: OutputDrain,
    hooks: RwLock<Vec<ReportHookError>>,
    report_mask: usize,
    report: Logger,
}

impl HandleCore {
    fn read_hooks(&self) -> RwLockReadGuard<'_, Vec<ReportHookError>> {
        self.hooks.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_hooks(&self) -> RwLockWriteGuard<'_, Vec<ReportHookError>> {
        self.hooks.write().unwrap_or_else(|e| e.into_inner())
    }
}

struct HandleDrain(Arc<HandleCore>);

impl Drain for HandleDrain {
    type Ok = ();
    type Err = Never;

    fn log(&self, record: &Record, logger_values: &OwnedKVList) -> Result<(), Never> {
        let core = &self.0;
        if !core.level.allows(record.level()) {
            return Ok(());
        }

        core.output_drain.log(record, logger_values)?;
        for hook in core.read_hooks().iter() {
            if hook.accepts(record.level()) {
                hook.fire(record, logger_values, &core.report);
            }
        }
        Ok(())
    }

    #[inline]
    fn is_enabled(&self, level: Level) -> bool {
        self.0.level.allows(level)
    }
}

pub struct LoggerHandleBuilder {
    level: Severity,
    output: LogOutput,
    sampling_offset: usize,
}

impl LoggerHandleBuilder {
    pub fn new(level: Severity) -> Self {
        LoggerHandleBuilder {
            level,
            output: LogOutput::default(),
            sampling_offset: HOOK_ERROR_SAMPLING_OFFSET_DEFAULT,
        }
    }

    pub fn output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    /// After the first two errors of a hook, only one in every `2^offset` is reported.
    pub fn hook_error_sampling_offset(mut self, offset: usize) -> Self {
        self.sampling_offset = offset.min(HOOK_ERROR_SAMPLING_OFFSET_MAX);
        self
    }

    pub fn build(self) -> LoggerHandle {
        let output_drain = OutputDrain::new(self.output);
        let report = Logger::root(output_drain.clone(), o!("facility" => "logrelay"));
        let core = Arc::new(HandleCore {
            level: self.level,
            output: self.output,
            output_drain,
            hooks: RwLock::new(Vec::new()),
            report_mask: (1 << self.sampling_offset) - 1,
            report,
        });
        let logger = Logger::root(HandleDrain(Arc::clone(&core)), o!());
        LoggerHandle { core, logger }
    }
}

/// The logging facility: a severity threshold, a primary output and the
/// attached hooks.
///
/// Each record that passes the threshold goes to the output first, then to
/// every hook that accepts its level, in the order the hooks were added.
pub struct LoggerHandle {
    core: Arc<HandleCore>,
    logger: Logger,
}

impl fmt::Debug for LoggerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerHandle")
            .field("level", &self.core.level)
            .field("output", &self.core.output)
            .field("hooks", &self.hook_count())
            .finish()
    }
}

impl Default for LoggerHandle {
    fn default() -> Self {
        LoggerHandle::new(Severity::default())
    }
}

impl LoggerHandle {
    pub fn new(level: Severity) -> Self {
        LoggerHandleBuilder::new(level).build()
    }

    pub fn with_output(level: Severity, output: LogOutput) -> Self {
        LoggerHandleBuilder::new(level).output(output).build()
    }

    pub fn builder(level: Severity) -> LoggerHandleBuilder {
        LoggerHandleBuilder::new(level)
    }

    #[inline]
    pub fn level(&self) -> Severity {
        self.core.level
    }

    #[inline]
    pub fn output(&self) -> LogOutput {
        self.core.output
    }

    #[inline]
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn add_hook(&self, hook: ArcLogHook) {
        let hook = ReportHookError::new(hook, self.core.report_mask);
        self.core.write_hooks().push(hook);
    }

    pub fn hook_count(&self) -> usize {
        self.core.read_hooks().len()
    }

    pub fn hooks(&self) -> Vec<HookInfo> {
        self.core.read_hooks().iter().map(|h| h.info()).collect()
    }

    pub fn output_stats(&self) -> Option<LogSnapshot> {
        self.core.output_drain.stats().map(|s| s.snapshot())
    }
}
