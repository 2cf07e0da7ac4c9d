/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time copy of [`LogStats`].
#[derive(Clone, Copy, Default, Debug, Eq, PartialEq)]
pub struct LogSnapshot {
    pub total: u64,
    pub delivered: u64,
    pub delivered_bytes: u64,
    pub format_failed: u64,
    pub channel_closed: u64,
    pub channel_overflow: u64,
    pub peer_unreachable: u64,
}

impl LogSnapshot {
    /// Records accepted but not delivered, whatever the reason.
    pub fn dropped(&self) -> u64 {
        self.format_failed + self.channel_closed + self.channel_overflow + self.peer_unreachable
    }
}

/// Delivery counters of an output drain or a hook.
#[derive(Default)]
pub struct LogStats {
    total: AtomicU64,
    delivered: AtomicU64,
    delivered_bytes: AtomicU64,
    format_failed: AtomicU64,
    channel_closed: AtomicU64,
    channel_overflow: AtomicU64,
    peer_unreachable: AtomicU64,
}

#[inline]
fn incr(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

impl LogStats {
    pub fn add_total(&self) {
        incr(&self.total);
    }

    /// Count one record written out with `size` bytes.
    pub fn add_delivered(&self, size: usize) {
        incr(&self.delivered);
        self.delivered_bytes
            .fetch_add(size as u64, Ordering::Relaxed);
    }

    pub fn add_format_failed(&self) {
        incr(&self.format_failed);
    }

    pub fn add_channel_closed(&self) {
        incr(&self.channel_closed);
    }

    pub fn add_channel_overflow(&self) {
        incr(&self.channel_overflow);
    }

    pub fn add_peer_unreachable(&self) {
        incr(&self.peer_unreachable);
    }

    pub fn snapshot(&self) -> LogSnapshot {
        let load = |c: &AtomicU64| c.load(Ordering::Relaxed);
        LogSnapshot {
            total: load(&self.total),
            delivered: load(&self.delivered),
            delivered_bytes: load(&self.delivered_bytes),
            format_failed: load(&self.format_failed),
            channel_closed: load(&self.channel_closed),
            channel_overflow: load(&self.channel_overflow),
            peer_unreachable: load(&self.peer_unreachable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters() {
        let stats = LogStats::default();
        for _ in 0..5 {
            stats.add_total();
        }
        stats.add_delivered(120);
        stats.add_delivered(80);
        stats.add_format_failed();
        stats.add_channel_overflow();
        stats.add_peer_unreachable();

        let snap = stats.snapshot();
        assert_eq!(snap.total, 5);
        assert_eq!(snap.delivered, 2);
        assert_eq!(snap.delivered_bytes, 200);
        assert_eq!(snap.channel_closed, 0);
        assert_eq!(snap.dropped(), 3);
        assert_eq!(snap.delivered + snap.dropped(), snap.total);
    }
}
