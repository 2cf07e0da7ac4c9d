/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::cell::RefCell;
use std::fmt::{Arguments, Write};

use itoa::Integer;
use ryu::Float;
use slog::{KV, OwnedKVList, Record, Serializer};

use logrelay_types::log::{AsyncLogFormatter, Severity};

use super::StdLogValue;

thread_local! {
    static TL_BUF: RefCell<String> = RefCell::new(String::with_capacity(128));
}

pub struct StdLogFormatter {
    append_code_position: bool,
}

impl StdLogFormatter {
    pub(super) fn new(append_code_position: bool) -> Self {
        StdLogFormatter {
            append_code_position,
        }
    }
}

impl AsyncLogFormatter<StdLogValue> for StdLogFormatter {
    fn format_slog(
        &self,
        record: &Record,
        logger_values: &OwnedKVList,
    ) -> Result<StdLogValue, slog::Error> {
        let mut kv_pairs = Vec::new();
        let mut kv_formatter = FormatterKv(&mut kv_pairs);

        logger_values.serialize(record, &mut kv_formatter)?;
        record.kv().serialize(record, &mut kv_formatter)?;

        let location = if self.append_code_position {
            let location = match record.file().rsplit_once('/').map(|x| x.1) {
                Some(filename) => format!("{}({filename}:{})", record.module(), record.line()),
                None => format!("{}({}:{})", record.module(), record.file(), record.line()),
            };
            Some(location)
        } else {
            None
        };

        Ok(StdLogValue {
            severity: Severity::from_slog(record.level()),
            message: record.msg().to_string(),
            kv_pairs,
            location,
        })
    }
}

struct FormatterKv<'a>(&'a mut Vec<(String, String)>);

impl FormatterKv<'_> {
    fn emit_integer<T: Integer>(&mut self, key: slog::Key, value: T) -> slog::Result {
        let mut buffer = itoa::Buffer::new();
        self.emit_str(key, buffer.format(value))
    }

    fn emit_float<T: Float>(&mut self, key: slog::Key, value: T) -> slog::Result {
        let mut buffer = ryu::Buffer::new();
        self.emit_str(key, buffer.format(value))
    }
}

impl Serializer for FormatterKv<'_> {
    impl_integer_by_itoa! {
        usize => emit_usize,
        isize => emit_isize,
        u8 => emit_u8,
        i8 => emit_i8,
        u16 => emit_u16,
        i16 => emit_i16,
        u32 => emit_u32,
        i32 => emit_i32,
        u64 => emit_u64,
        i64 => emit_i64,
    }

    impl_float_by_ryu! {
        f32 => emit_f32,
        f64 => emit_f64,
    }

    fn emit_bool(&mut self, key: slog::Key, value: bool) -> slog::Result {
        self.emit_str(key, if value { "true" } else { "false" })
    }

    fn emit_char(&mut self, key: slog::Key, value: char) -> slog::Result {
        self.emit_str(key, value.encode_utf8(&mut [0u8; 4]))
    }

    fn emit_none(&mut self, key: slog::Key) -> slog::Result {
        self.emit_str(key, "none")
    }

    fn emit_unit(&mut self, key: slog::Key) -> slog::Result {
        self.emit_str(key, "()")
    }

    fn emit_str(&mut self, key: slog::Key, value: &str) -> slog::Result {
        self.0.push((key.to_string(), value.to_string()));
        Ok(())
    }

    fn emit_arguments(&mut self, key: slog::Key, value: &Arguments) -> slog::Result {
        if let Some(s) = value.as_str() {
            self.emit_str(key, s)
        } else {
            TL_BUF.with_borrow_mut(|buf| {
                buf.clear();
                buf.write_fmt(*value)?;
                self.emit_str(key, buf.as_str())
            })
        }
    }
}
