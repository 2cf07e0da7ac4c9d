/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::sync::atomic::{AtomicUsize, Ordering};

use slog::{Level, Logger, OwnedKVList, Record};

use logrelay_types::log::{ArcLogHook, LogHook};

use super::HookInfo;

pub(crate) const HOOK_ERROR_SAMPLING_OFFSET_DEFAULT: usize = 10;
pub(crate) const HOOK_ERROR_SAMPLING_OFFSET_MAX: usize = 16;

/// Fire a hook and report its errors to the handle output.
pub(crate) struct ReportHookError {
    hook: ArcLogHook,
    error_count: AtomicUsize,
    report_mask: usize,
}

impl ReportHookError {
    pub(crate) fn new(hook: ArcLogHook, report_mask: usize) -> Self {
        ReportHookError {
            hook,
            error_count: AtomicUsize::new(0),
            report_mask,
        }
    }

    #[inline]
    pub(crate) fn accepts(&self, level: Level) -> bool {
        self.hook.levels().accepts(level)
    }

    pub(crate) fn fire(&self, record: &Record, logger_values: &OwnedKVList, report: &Logger) {
        match self.hook.fire(record, logger_values) {
            Ok(_) => {
                let error_count = self.error_count.swap(0, Ordering::Relaxed);
                if error_count != 0 {
                    slog::info!(
                        report,
                        "hook {} back to work, lost {} messages",
                        self.hook.name(),
                        error_count
                    );
                }
            }
            Err(e) => {
                let old_count = self.error_count.fetch_add(1, Ordering::Relaxed);
                match old_count {
                    0 | 1 => slog::warn!(report, "hook {} got error: {}", self.hook.name(), e),
                    _ => {
                        if (old_count & self.report_mask) == 0 {
                            slog::warn!(
                                report,
                                "hook {} has seen {} errors, latest error: {}",
                                self.hook.name(),
                                old_count,
                                e
                            );
                        }
                    }
                }
            }
        }
    }

    pub(crate) fn info(&self) -> HookInfo {
        HookInfo {
            name: self.hook.name().to_string(),
            levels: self.hook.levels(),
            stats: self.hook.stats().map(|s| s.snapshot()),
            error_count: self.error_count.load(Ordering::Relaxed),
        }
    }
}
