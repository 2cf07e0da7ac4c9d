/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt;

use bitflags::bitflags;
use slog::Level;

use super::Severity;

bitflags! {
    /// The set of severities a hook accepts.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct LevelSet: u8 {
        const TRACE = 1 << 0;
        const DEBUG = 1 << 1;
        const INFO = 1 << 2;
        const WARN = 1 << 3;
        const ERROR = 1 << 4;
        const FATAL = 1 << 5;
        const PANIC = 1 << 6;
    }
}

impl LevelSet {
    #[inline]
    pub const fn of(severity: Severity) -> Self {
        LevelSet::from_bits_retain(1 << severity.index())
    }

    pub fn at_least(min: Severity) -> Self {
        Severity::ALL
            .into_iter()
            .filter(|s| *s >= min)
            .fold(LevelSet::empty(), |set, s| set | LevelSet::of(s))
    }

    pub fn from_severities(severities: &[Severity]) -> Self {
        severities
            .iter()
            .fold(LevelSet::empty(), |set, s| set | LevelSet::of(*s))
    }

    #[inline]
    pub fn contains_severity(&self, severity: Severity) -> bool {
        self.contains(LevelSet::of(severity))
    }

    /// Critical records are accepted if either fatal or panic is in the set.
    pub fn accepts(&self, level: Level) -> bool {
        match level {
            Level::Critical => self.intersects(LevelSet::FATAL | LevelSet::PANIC),
            _ => self.contains_severity(Severity::from_slog(level)),
        }
    }

    pub fn min(&self) -> Option<Severity> {
        Severity::ALL
            .into_iter()
            .find(|s| self.contains_severity(*s))
    }

    pub fn severities(&self) -> impl Iterator<Item = Severity> + '_ {
        Severity::ALL
            .into_iter()
            .filter(|s| self.contains_severity(*s))
    }
}

impl fmt::Display for LevelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for s in self.severities() {
            if !first {
                f.write_str("|")?;
            }
            f.write_str(s.as_str())?;
            first = false;
        }
        Ok(())
    }
}
