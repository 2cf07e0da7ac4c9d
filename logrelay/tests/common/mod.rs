/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use slog::{Level, OwnedKVList, Record};

use logrelay::{LevelSet, LogHook};

static REGISTRY_LOCK: Mutex<()> = Mutex::new(());

/// Serialize tests that touch the published handle.
pub fn lock_registry() -> MutexGuard<'static, ()> {
    let guard = REGISTRY_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _ = logrelay::registry::take();
    guard
}

pub struct CaptureHook {
    levels: LevelSet,
    records: Mutex<Vec<(Level, String)>>,
}

impl CaptureHook {
    pub fn new(levels: LevelSet) -> Arc<Self> {
        Arc::new(CaptureHook {
            levels,
            records: Mutex::new(Vec::new()),
        })
    }

    pub fn records(&self) -> Vec<(Level, String)> {
        self.records.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|(_, m)| m).collect()
    }
}

impl LogHook for CaptureHook {
    fn name(&self) -> &str {
        "capture"
    }

    fn levels(&self) -> LevelSet {
        self.levels
    }

    fn fire(&self, record: &Record, _values: &OwnedKVList) -> Result<(), slog::Error> {
        self.records
            .lock()
            .unwrap()
            .push((record.level(), record.msg().to_string()));
        Ok(())
    }
}
