/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use thiserror::Error;

use logrelay_logstash::UnknownTransport;
use logrelay_types::log::{LevelSet, LogSnapshot, SeverityIndexError};

/// Why a hook was not attached.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("invalid hook level: {0}")]
    InvalidSeverity(#[from] SeverityIndexError),
    #[error(transparent)]
    UnsupportedTransport(#[from] UnknownTransport),
    #[error("error dialing logstash ({addr}): {reason}")]
    Dial { addr: String, reason: String },
    #[error("logstash self test failed: {0}")]
    SelfTest(String),
    #[error("unable to create sentry client: {0}")]
    Client(String),
    #[error("unable to create sentry hook: {0}")]
    Hook(String),
}

/// Result of a hook installation.
///
/// Installation never fails the caller, a skipped hook has already been
/// reported through the logger handle.
#[must_use]
#[derive(Debug)]
pub enum HookStatus {
    Attached,
    Skipped(HookError),
}

impl HookStatus {
    #[inline]
    pub fn is_attached(&self) -> bool {
        matches!(self, HookStatus::Attached)
    }

    pub fn error(&self) -> Option<&HookError> {
        match self {
            HookStatus::Attached => None,
            HookStatus::Skipped(e) => Some(e),
        }
    }
}

impl From<HookError> for HookStatus {
    fn from(e: HookError) -> Self {
        HookStatus::Skipped(e)
    }
}

#[derive(Debug)]
pub struct HookInfo {
    pub name: String,
    pub levels: LevelSet,
    pub stats: Option<LogSnapshot>,
    /// Consecutive fire errors since the last success.
    pub error_count: usize,
}
