/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::cell::RefCell;
use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use anyhow::{Context, anyhow};
use slog::{OwnedKVList, Record};

use logrelay_types::log::{LevelSet, LogHook, LogStats, Severity};

use super::{LogstashClientConfig, LogstashConnection, LogstashFormatter};

thread_local! {
    static TL_BUF: RefCell<Vec<u8>> = RefCell::new(Vec::with_capacity(512));
}

/// Forward records to a logstash input over a single long-lived connection.
///
/// The connection is never re-established. Once it is closed, every fire
/// attempt fails and is counted as a closed channel.
pub struct LogstashHook {
    name: String,
    levels: LevelSet,
    formatter: LogstashFormatter,
    conn: Mutex<Option<LogstashConnection>>,
    peer: SocketAddr,
    write_timeout: Duration,
    stats: Arc<LogStats>,
}

impl LogstashHook {
    /// Dial the server, the hook accepts `level` and every more severe level.
    pub fn connect(config: &LogstashClientConfig, level: Severity) -> anyhow::Result<Self> {
        let conn = config.connect()?;
        let peer = conn
            .peer_addr()
            .context("failed to get peer address of the new connection")?;
        Ok(LogstashHook::with_connection(conn, peer, config, level))
    }

    fn with_connection(
        conn: LogstashConnection,
        peer: SocketAddr,
        config: &LogstashClientConfig,
        level: Severity,
    ) -> Self {
        LogstashHook {
            name: format!("logstash {}://{peer}", config.transport()),
            levels: LevelSet::at_least(level),
            formatter: LogstashFormatter::new(config.type_name.clone()),
            conn: Mutex::new(Some(conn)),
            peer,
            write_timeout: config.write_timeout(),
            stats: Arc::new(LogStats::default()),
        }
    }

    fn lock_conn(&self) -> MutexGuard<'_, Option<LogstashConnection>> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Write one empty probe event, bounded by `timeout`.
    pub fn self_test(&self, timeout: Duration) -> anyhow::Result<()> {
        let mut buf = Vec::with_capacity(128);
        self.formatter
            .format_probe(&mut buf)
            .context("failed to format probe event")?;

        let mut guard = self.lock_conn();
        let Some(conn) = guard.as_mut() else {
            return Err(anyhow!("connection already closed"));
        };
        conn.set_write_timeout(Some(timeout))
            .context("failed to set self test timeout")?;
        conn.send(&buf)
            .map_err(|e| anyhow!("failed to send probe event to {}: {e}", self.peer))?;
        conn.set_write_timeout(Some(self.write_timeout))
            .context("failed to restore write timeout")?;
        Ok(())
    }

    /// Shut the connection down, later records will be dropped.
    pub fn close(&self) {
        if let Some(conn) = self.lock_conn().take() {
            conn.shutdown();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.lock_conn().is_none()
    }

    fn send(&self, buf: &[u8]) -> io::Result<()> {
        match self.lock_conn().as_mut() {
            Some(conn) => conn.send(buf),
            None => {
                self.stats.add_channel_closed();
                Err(io::Error::new(
                    io::ErrorKind::NotConnected,
                    "logstash connection closed",
                ))
            }
        }
    }
}

impl LogHook for LogstashHook {
    fn name(&self) -> &str {
        &self.name
    }

    fn levels(&self) -> LevelSet {
        self.levels
    }

    fn fire(&self, record: &Record, logger_values: &OwnedKVList) -> Result<(), slog::Error> {
        if !self.levels.accepts(record.level()) {
            return Ok(());
        }
        self.stats.add_total();

        TL_BUF.with_borrow_mut(|buf| {
            buf.clear();
            if let Err(e) = self.formatter.format(record, logger_values, buf) {
                self.stats.add_format_failed();
                return Err(e);
            }

            match self.send(buf) {
                Ok(_) => {
                    self.stats.add_delivered(buf.len());
                    Ok(())
                }
                Err(e) => {
                    if e.kind() != io::ErrorKind::NotConnected {
                        self.stats.add_peer_unreachable();
                    }
                    Err(slog::Error::Io(e))
                }
            }
        })
    }

    fn stats(&self) -> Option<Arc<LogStats>> {
        Some(Arc::clone(&self.stats))
    }
}

impl Drop for LogstashHook {
    fn drop(&mut self) {
        self.close();
    }
}
