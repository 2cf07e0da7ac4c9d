/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;

use flume::{Sender, TrySendError};
use slog::{Drain, OwnedKVList, Record};

use super::LogStats;

const DEFAULT_CHANNEL_CAPACITY: usize = 4096;

/// Channel and thread settings for an output IO thread.
#[derive(Clone, Debug)]
pub struct AsyncLogConfig {
    pub channel_capacity: usize,
    pub thread_name: String,
}

impl AsyncLogConfig {
    pub fn with_name(thread_name: &str) -> Self {
        AsyncLogConfig {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            thread_name: thread_name.to_string(),
        }
    }
}

/// Turn a record into the owned value sent to the IO thread.
pub trait AsyncLogFormatter<T> {
    fn format_slog(&self, record: &Record, logger_values: &OwnedKVList) -> Result<T, slog::Error>;
}

/// Output drain that never blocks the caller.
///
/// Records are formatted on the calling thread and dropped when the IO thread
/// falls behind.
pub struct AsyncLogger<T, F> {
    sender: Sender<T>,
    formatter: F,
    stats: Arc<LogStats>,
}

impl<T, F> AsyncLogger<T, F>
where
    F: AsyncLogFormatter<T>,
{
    pub fn new(sender: Sender<T>, formatter: F, stats: Arc<LogStats>) -> Self {
        AsyncLogger {
            sender,
            formatter,
            stats,
        }
    }

    pub fn stats(&self) -> Arc<LogStats> {
        Arc::clone(&self.stats)
    }
}

impl<T, F> Drain for AsyncLogger<T, F>
where
    F: AsyncLogFormatter<T>,
{
    type Ok = ();
    type Err = slog::Error;

    fn log(&self, record: &Record, logger_values: &OwnedKVList) -> Result<(), slog::Error> {
        self.stats.add_total();

        let value = self
            .formatter
            .format_slog(record, logger_values)
            .inspect_err(|_| self.stats.add_format_failed())?;
        if let Err(e) = self.sender.try_send(value) {
            match e {
                TrySendError::Full(_) => self.stats.add_channel_overflow(),
                TrySendError::Disconnected(_) => self.stats.add_channel_closed(),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slog::{Logger, o};

    struct MsgFormatter;

    impl AsyncLogFormatter<String> for MsgFormatter {
        fn format_slog(&self, record: &Record, _values: &OwnedKVList) -> Result<String, slog::Error> {
            Ok(record.msg().to_string())
        }
    }

    #[test]
    fn overflow() {
        let (sender, receiver) = flume::bounded::<String>(1);
        let drain = AsyncLogger::new(sender, MsgFormatter, Arc::new(LogStats::default()));
        let stats = drain.stats();
        let logger = Logger::root(drain.ignore_res(), o!());

        slog::info!(logger, "first");
        slog::info!(logger, "second");
        assert_eq!(receiver.try_recv().unwrap(), "first");

        let snap = stats.snapshot();
        assert_eq!(snap.total, 2);
        assert_eq!(snap.channel_overflow, 1);

        drop(receiver);
        slog::info!(logger, "third");
        assert_eq!(stats.snapshot().channel_closed, 1);
    }
}
