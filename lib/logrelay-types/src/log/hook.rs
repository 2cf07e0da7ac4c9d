/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;

use slog::{OwnedKVList, Record};

use super::{LevelSet, LogStats};

/// A sink that receives a copy of each record accepted by a logger handle.
pub trait LogHook: Send + Sync {
    fn name(&self) -> &str;

    /// Severities this hook forwards, records of other levels are ignored.
    fn levels(&self) -> LevelSet;

    /// Forward one record to the sink.
    ///
    /// Implementations should return `Ok` without doing anything if the record
    /// level is not accepted by [`LogHook::levels`].
    fn fire(&self, record: &Record, logger_values: &OwnedKVList) -> Result<(), slog::Error>;

    fn stats(&self) -> Option<Arc<LogStats>> {
        None
    }
}

pub type ArcLogHook = Arc<dyn LogHook>;
