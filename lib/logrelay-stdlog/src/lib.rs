/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use chrono::Local;
use flume::Receiver;

use logrelay_types::log::{AsyncLogConfig, AsyncLogger, LogStats, Severity};

#[macro_use]
mod macros;

mod format;
pub use format::StdLogFormatter;

pub type StdLogger = AsyncLogger<StdLogValue, StdLogFormatter>;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

pub struct StdLogValue {
    severity: Severity,
    message: String,
    kv_pairs: Vec<(String, String)>,
    location: Option<String>,
}

impl StdLogValue {
    fn message_str(&self) -> &str {
        if self.message.is_empty() {
            "()"
        } else {
            &self.message
        }
    }
}

/// Spawn the IO thread for stderr, or stdout if `use_stdout` is set.
///
/// Colors are used only if the output is a terminal.
pub fn new_async_logger(
    async_conf: &AsyncLogConfig,
    append_code_position: bool,
    use_stdout: bool,
) -> StdLogger {
    let (sender, receiver) = flume::bounded::<StdLogValue>(async_conf.channel_capacity);

    let stats = Arc::new(LogStats::default());

    let io_thread = AsyncIoThread {
        receiver,
        stats: Arc::clone(&stats),
    };

    let _detached_thread = std::thread::Builder::new()
        .name(async_conf.thread_name.clone())
        .spawn(move || {
            if use_stdout {
                io_thread.run_with_stdout();
            } else {
                io_thread.run_with_stderr();
            }
        });

    AsyncLogger::new(sender, StdLogFormatter::new(append_code_position), stats)
}

/// Spawn the IO thread for any writer, always in plain format.
pub fn new_async_logger_with_writer<W>(
    async_conf: &AsyncLogConfig,
    append_code_position: bool,
    writer: W,
) -> StdLogger
where
    W: Write + Send + 'static,
{
    let (sender, receiver) = flume::bounded::<StdLogValue>(async_conf.channel_capacity);

    let stats = Arc::new(LogStats::default());

    let io_thread = AsyncIoThread {
        receiver,
        stats: Arc::clone(&stats),
    };

    let _detached_thread = std::thread::Builder::new()
        .name(async_conf.thread_name.clone())
        .spawn(move || io_thread.run_plain(writer));

    AsyncLogger::new(sender, StdLogFormatter::new(append_code_position), stats)
}

struct AsyncIoThread {
    receiver: Receiver<StdLogValue>,
    stats: Arc<LogStats>,
}

impl AsyncIoThread {
    fn write_time<IO: Write>(&self, io: &mut IO) -> io::Result<()> {
        let datetime = Local::now();
        write!(io, "{}", datetime.format(TIME_FORMAT))
    }

    fn run_with_stderr(self) {
        let stderr = io::stderr();
        if stderr.is_terminal() {
            self.run_console(stderr)
        } else {
            self.run_plain(stderr)
        }
    }

    fn run_with_stdout(self) {
        let stdout = io::stdout();
        if stdout.is_terminal() {
            self.run_console(stdout)
        } else {
            self.run_plain(stdout)
        }
    }

    fn run_plain<IO: Write>(&self, mut io: IO) {
        let mut buf: Vec<u8> = Vec::with_capacity(1024);
        while let Ok(v) = self.receiver.recv() {
            buf.clear();
            let _ = self.write_plain(&mut buf, v);
            self.write_buf(&mut io, &buf);

            while let Ok(v) = self.receiver.try_recv() {
                buf.clear();
                let _ = self.write_plain(&mut buf, v);
                self.write_buf(&mut io, &buf);
            }

            let _ = io.flush();
        }
    }

    fn write_plain<IO: Write>(&self, io: &mut IO, v: StdLogValue) -> io::Result<()> {
        self.write_time(io)?;
        write_plain_body(io, &v)
    }

    fn run_console<IO: Write>(&self, mut io: IO) {
        let mut buf: Vec<u8> = Vec::with_capacity(1024);
        while let Ok(v) = self.receiver.recv() {
            buf.clear();
            let _ = self.write_console(&mut buf, v);
            self.write_buf(&mut io, &buf);

            while let Ok(v) = self.receiver.try_recv() {
                buf.clear();
                let _ = self.write_console(&mut buf, v);
                self.write_buf(&mut io, &buf);
            }

            let _ = io.flush();
        }
    }

    fn write_console<IO: Write>(&self, io: &mut IO, v: StdLogValue) -> io::Result<()> {
        use anstyle::{AnsiColor, Color, Style};

        const COLOR_MAGENTA: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Magenta)));
        const COLOR_RED: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));
        const COLOR_YELLOW: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
        const COLOR_GREEN: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));
        const COLOR_CYAN: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan)));
        const COLOR_BLUE: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue)));
        const STYLE_BOLD: Style = Style::new().bold();
        const STYLE_ITALIC: Style = Style::new().italic();

        let bold_s = STYLE_BOLD.render();
        let bold_e = STYLE_BOLD.render_reset();

        self.write_time(io)?;
        let level_color = match v.severity {
            Severity::Fatal | Severity::Panic => COLOR_MAGENTA,
            Severity::Error => COLOR_RED,
            Severity::Warn => COLOR_YELLOW,
            Severity::Info => COLOR_GREEN,
            Severity::Debug => COLOR_CYAN,
            Severity::Trace => COLOR_BLUE,
        };
        write!(
            io,
            " {}{}{}",
            level_color.render(),
            v.severity.as_str().to_uppercase(),
            level_color.render_reset(),
        )?;

        for (k, v) in &v.kv_pairs {
            write!(io, " {bold_s}{k}{bold_e}={v},")?;
        }

        write!(io, " {bold_s}{}{bold_e}", v.message_str())?;

        if let Some(location) = &v.location {
            write!(
                io,
                " <{}{location}{}>",
                STYLE_ITALIC.render(),
                STYLE_ITALIC.render_reset()
            )?;
        }
        writeln!(io)
    }

    fn write_buf<IO: Write>(&self, io: &mut IO, buf: &[u8]) {
        match io.write_all(buf) {
            Ok(_) => self.stats.add_delivered(buf.len()),
            Err(_) => self.stats.add_peer_unreachable(),
        }
    }
}

fn write_plain_body<IO: Write>(io: &mut IO, v: &StdLogValue) -> io::Result<()> {
    write!(io, " {}", v.severity.as_str().to_uppercase())?;
    for (k, v) in &v.kv_pairs {
        write!(io, " {k}: {v},")?;
    }
    write!(io, " {}", v.message_str())?;
    if let Some(location) = &v.location {
        write!(io, " <{location}>")?;
    }
    writeln!(io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    use slog::{Drain, Logger, o};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn wait_lines(&self, n: usize) -> String {
            let deadline = Instant::now() + Duration::from_secs(5);
            loop {
                let s = String::from_utf8(self.0.lock().unwrap().clone()).unwrap();
                if s.lines().count() >= n || Instant::now() > deadline {
                    return s;
                }
                std::thread::sleep(Duration::from_millis(10));
            }
        }
    }

    #[test]
    fn plain_body() {
        let v = StdLogValue {
            severity: Severity::Warn,
            message: "disk almost full".to_string(),
            kv_pairs: vec![("mount".to_string(), "/var".to_string())],
            location: Some("app(main.rs:10)".to_string()),
        };
        let mut buf = Vec::new();
        write_plain_body(&mut buf, &v).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            " WARN mount: /var, disk almost full <app(main.rs:10)>\n"
        );

        let v = StdLogValue {
            severity: Severity::Info,
            message: String::new(),
            kv_pairs: Vec::new(),
            location: None,
        };
        let mut buf = Vec::new();
        write_plain_body(&mut buf, &v).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), " INFO ()\n");
    }

    #[test]
    fn write_through_thread() {
        let out = SharedBuf::default();
        let drain = new_async_logger_with_writer(
            &AsyncLogConfig::with_name("stdlog-test"),
            false,
            out.clone(),
        );
        let stats = drain.stats();
        let logger = Logger::root(drain.ignore_res(), o!("svc" => "relay"));

        slog::info!(logger, "started"; "port" => 5000u16);
        slog::crit!(logger, "stopping");

        let s = out.wait_lines(2);
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" INFO svc: relay, port: 5000, started"));
        assert!(lines[1].ends_with(" FATAL svc: relay, stopping"));

        assert_eq!(stats.snapshot().total, 2);
    }
}
