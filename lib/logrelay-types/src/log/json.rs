/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt::{self, Arguments};

use serde_json::{Map, Number, Value};
use slog::{KV, Key, OwnedKVList, Record, Serializer};

/// Collect slog key-values into a json object.
///
/// Later keys overwrite earlier ones with the same name.
pub struct JsonKvCollector<'a> {
    map: &'a mut Map<String, Value>,
}

impl<'a> JsonKvCollector<'a> {
    pub fn new(map: &'a mut Map<String, Value>) -> Self {
        JsonKvCollector { map }
    }

    fn insert(&mut self, key: Key, value: Value) -> slog::Result {
        self.map.insert(key.to_string(), value);
        Ok(())
    }
}

macro_rules! impl_emit_number {
    ($t:ty => $f:ident) => {
        fn $f(&mut self, key: Key, val: $t) -> slog::Result {
            self.insert(key, Value::Number(Number::from(val)))
        }
    };
}

impl Serializer for JsonKvCollector<'_> {
    fn emit_arguments(&mut self, key: Key, val: &Arguments) -> slog::Result {
        let s = match val.as_str() {
            Some(s) => s.to_string(),
            None => fmt::format(*val),
        };
        self.insert(key, Value::String(s))
    }

    fn emit_str(&mut self, key: Key, val: &str) -> slog::Result {
        self.insert(key, Value::String(val.to_string()))
    }

    fn emit_char(&mut self, key: Key, val: char) -> slog::Result {
        self.insert(key, Value::String(val.to_string()))
    }

    fn emit_bool(&mut self, key: Key, val: bool) -> slog::Result {
        self.insert(key, Value::Bool(val))
    }

    fn emit_unit(&mut self, key: Key) -> slog::Result {
        self.insert(key, Value::Null)
    }

    fn emit_none(&mut self, key: Key) -> slog::Result {
        self.insert(key, Value::Null)
    }

    impl_emit_number!(u8 => emit_u8);
    impl_emit_number!(u16 => emit_u16);
    impl_emit_number!(u32 => emit_u32);
    impl_emit_number!(u64 => emit_u64);
    impl_emit_number!(usize => emit_usize);
    impl_emit_number!(i8 => emit_i8);
    impl_emit_number!(i16 => emit_i16);
    impl_emit_number!(i32 => emit_i32);
    impl_emit_number!(i64 => emit_i64);
    impl_emit_number!(isize => emit_isize);

    fn emit_f32(&mut self, key: Key, val: f32) -> slog::Result {
        self.emit_f64(key, val as f64)
    }

    fn emit_f64(&mut self, key: Key, val: f64) -> slog::Result {
        // NaN and infinity are not representable in json
        match Number::from_f64(val) {
            Some(n) => self.insert(key, Value::Number(n)),
            None => self.insert(key, Value::String(val.to_string())),
        }
    }
}

/// Collect the logger values and then the record values of a slog record.
pub fn collect_kv_json(
    record: &Record,
    logger_values: &OwnedKVList,
) -> Result<Map<String, Value>, slog::Error> {
    let mut map = Map::new();
    let mut collector = JsonKvCollector::new(&mut map);
    logger_values.serialize(record, &mut collector)?;
    record.kv().serialize(record, &mut collector)?;
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use slog::{Drain, Logger, o};

    struct CollectDrain(Arc<Mutex<Vec<Map<String, Value>>>>);

    impl Drain for CollectDrain {
        type Ok = ();
        type Err = slog::Never;

        fn log(&self, record: &Record, values: &OwnedKVList) -> Result<(), slog::Never> {
            let map = collect_kv_json(record, values).unwrap();
            self.0.lock().unwrap().push(map);
            Ok(())
        }
    }

    #[test]
    fn collect() {
        let records = Arc::new(Mutex::new(Vec::new()));
        let logger = Logger::root(CollectDrain(records.clone()), o!("app" => "demo", "pid" => 42));
        slog::info!(logger, "hello"; "user" => "alice", "ok" => true, "ratio" => 0.5, "app" => "override");
        slog::info!(logger, "nan"; "v" => f64::NAN, "n" => Option::<u32>::None);

        let records = records.lock().unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first["user"], Value::String("alice".to_string()));
        assert_eq!(first["ok"], Value::Bool(true));
        assert_eq!(first["ratio"].as_f64(), Some(0.5));
        assert_eq!(first["pid"].as_i64(), Some(42));
        assert_eq!(first["app"], Value::String("override".to_string()));

        let second = &records[1];
        assert_eq!(second["v"], Value::String("NaN".to_string()));
        assert_eq!(second["n"], Value::Null);
    }
}
