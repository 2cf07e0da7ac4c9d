/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use slog::{OwnedKVList, Record};

use logrelay_types::log::{Severity, collect_kv_json};

const RESERVED_KEYS: &[&str] = &["@timestamp", "@version", "message", "level", "module", "type"];
const RESERVED_PREFIX: &str = "fields.";

/// Format records as logstash `json_lines` events.
#[derive(Clone, Debug, Default)]
pub struct LogstashFormatter {
    type_name: Option<String>,
}

impl LogstashFormatter {
    pub fn new(type_name: Option<String>) -> Self {
        LogstashFormatter { type_name }
    }

    fn finish(&self, mut map: Map<String, Value>, buf: &mut Vec<u8>) -> io::Result<()> {
        map.insert(
            "@timestamp".to_string(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        map.insert("@version".to_string(), Value::String("1".to_string()));
        if let Some(type_name) = &self.type_name {
            map.insert("type".to_string(), Value::String(type_name.clone()));
        }
        serde_json::to_writer(&mut *buf, &map)?;
        buf.push(b'\n');
        Ok(())
    }

    pub fn format(
        &self,
        record: &Record,
        logger_values: &OwnedKVList,
        buf: &mut Vec<u8>,
    ) -> Result<(), slog::Error> {
        let fields = collect_kv_json(record, logger_values)?;

        let mut map = Map::with_capacity(fields.len() + 6);
        for (k, v) in fields {
            if RESERVED_KEYS.contains(&k.as_str()) {
                map.insert(format!("{RESERVED_PREFIX}{k}"), v);
            } else {
                map.insert(k, v);
            }
        }
        map.insert(
            "level".to_string(),
            Value::String(Severity::from_slog(record.level()).as_str().to_string()),
        );
        map.insert("message".to_string(), Value::String(record.msg().to_string()));
        map.insert("module".to_string(), Value::String(record.module().to_string()));

        self.finish(map, buf)?;
        Ok(())
    }

    /// An event without level and with empty message, used to probe the connection.
    pub fn format_probe(&self, buf: &mut Vec<u8>) -> io::Result<()> {
        let mut map = Map::new();
        map.insert("message".to_string(), Value::String(String::new()));
        self.finish(map, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use slog::{Drain, Logger, o};

    struct FormatDrain {
        formatter: LogstashFormatter,
        lines: Arc<Mutex<Vec<Vec<u8>>>>,
    }

    impl Drain for FormatDrain {
        type Ok = ();
        type Err = slog::Error;

        fn log(&self, record: &Record, values: &OwnedKVList) -> Result<(), slog::Error> {
            let mut buf = Vec::new();
            self.formatter.format(record, values, &mut buf)?;
            self.lines.lock().unwrap().push(buf);
            Ok(())
        }
    }

    fn parse_line(buf: &[u8]) -> Map<String, Value> {
        assert_eq!(buf.last(), Some(&b'\n'));
        assert_eq!(buf.iter().filter(|b| **b == b'\n').count(), 1);
        serde_json::from_slice(buf).unwrap()
    }

    #[test]
    fn record() {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let drain = FormatDrain {
            formatter: LogstashFormatter::new(Some("relay".to_string())),
            lines: lines.clone(),
        };
        let logger = Logger::root(drain.fuse(), o!("pid" => 7));
        slog::warn!(
            logger,
            "queue is full";
            "size" => 128,
            "level" => "shadowed",
            "module" => "billing"
        );
        slog::crit!(logger, "line\nbreak");

        let lines = lines.lock().unwrap();
        let first = parse_line(&lines[0]);
        assert_eq!(first["message"], "queue is full");
        assert_eq!(first["level"], "warn");
        assert_eq!(first["@version"], "1");
        assert_eq!(first["type"], "relay");
        assert_eq!(first["size"], 128);
        assert_eq!(first["pid"], 7);
        assert_eq!(first["fields.level"], "shadowed");
        assert_eq!(first["fields.module"], "billing");
        assert!(first["module"].as_str().unwrap().starts_with("logrelay_logstash"));
        assert!(first["@timestamp"].as_str().unwrap().ends_with('Z'));

        let second = parse_line(&lines[1]);
        assert_eq!(second["level"], "fatal");
        assert_eq!(second["message"], "line\nbreak");
    }

    #[test]
    fn probe() {
        let mut buf = Vec::new();
        LogstashFormatter::default().format_probe(&mut buf).unwrap();
        let map = parse_line(&buf);
        assert_eq!(map["message"], "");
        assert!(map.get("level").is_none());
        assert!(map.get("type").is_none());
        assert_eq!(map.len(), 3);
    }
}
