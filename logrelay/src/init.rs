/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;

use logrelay_types::log::{Severity, SeverityIndexError};

use super::{LogOutput, LoggerHandle, registry};

/// Publish a new stderr handle with the severity at `level_index`.
///
/// An invalid index leaves the registry untouched.
pub fn init_logger(level_index: usize) -> Result<Arc<LoggerHandle>, SeverityIndexError> {
    let level = Severity::from_index(level_index)?;
    Ok(init_logger_with(level, LogOutput::Stderr))
}

pub fn init_logger_with(level: Severity, output: LogOutput) -> Arc<LoggerHandle> {
    let handle = Arc::new(LoggerHandle::with_output(level, output));
    publish(handle)
}

pub(crate) fn publish(handle: Arc<LoggerHandle>) -> Arc<LoggerHandle> {
    registry::set(Arc::clone(&handle));
    slog::info!(
        handle.logger(),
        "logging established with level \"{}\" on {}",
        handle.level(),
        handle.output()
    );
    handle
}
