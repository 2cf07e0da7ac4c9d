/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

//! The process-wide slot for the published logger handle.

use std::sync::Arc;

use arc_swap::ArcSwapOption;

use super::LoggerHandle;

static LOGGER_HANDLE: ArcSwapOption<LoggerHandle> = ArcSwapOption::const_empty();

/// Publish `handle`, replacing any previous one.
pub fn set(handle: Arc<LoggerHandle>) {
    LOGGER_HANDLE.store(Some(handle));
}

/// Get the published handle.
///
/// If nothing is published, a new default handle is returned without being
/// stored, so hooks added to it are not seen by later calls.
pub fn get() -> Arc<LoggerHandle> {
    match LOGGER_HANDLE.load_full() {
        Some(handle) => handle,
        None => Arc::new(LoggerHandle::default()),
    }
}

/// Get the published handle, if any.
pub fn published() -> Option<Arc<LoggerHandle>> {
    LOGGER_HANDLE.load_full()
}

pub fn take() -> Option<Arc<LoggerHandle>> {
    LOGGER_HANDLE.swap(None)
}
