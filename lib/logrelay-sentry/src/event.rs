/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::backtrace::Backtrace;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use slog::{OwnedKVList, Record};
use uuid::Uuid;

use logrelay_types::log::{Severity, collect_kv_json};

use super::{CLIENT_NAME, SentryClientConfig};

const EVENT_PLATFORM: &str = "other";

fn sentry_level(severity: Severity) -> &'static str {
    match severity {
        Severity::Trace | Severity::Debug => "debug",
        Severity::Info => "info",
        Severity::Warn => "warning",
        Severity::Error => "error",
        Severity::Fatal | Severity::Panic => "fatal",
    }
}

/// A store API event.
pub struct SentryEvent {
    event_id: Uuid,
    timestamp: DateTime<Utc>,
    body: Map<String, Value>,
}

impl SentryEvent {
    pub fn from_record(
        record: &Record,
        logger_values: &OwnedKVList,
        config: &SentryClientConfig,
        stacktrace: bool,
    ) -> Result<Self, slog::Error> {
        let mut extra = collect_kv_json(record, logger_values)?;
        extra.insert(
            "location".to_string(),
            Value::String(format!("{}:{}", record.file(), record.line())),
        );
        if stacktrace {
            let bt = Backtrace::force_capture();
            extra.insert("stacktrace".to_string(), Value::String(bt.to_string()));
        }

        let mut body = Map::new();
        body.insert(
            "level".to_string(),
            Value::String(sentry_level(Severity::from_slog(record.level())).to_string()),
        );
        body.insert("logger".to_string(), Value::String(CLIENT_NAME.to_string()));
        body.insert("message".to_string(), Value::String(record.msg().to_string()));
        body.insert("culprit".to_string(), Value::String(record.module().to_string()));
        body.insert("extra".to_string(), Value::Object(extra));

        let mut event = SentryEvent {
            event_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            body,
        };
        event.set_context(config);
        Ok(event)
    }

    fn set_context(&mut self, config: &SentryClientConfig) {
        self.body.insert(
            "platform".to_string(),
            Value::String(EVENT_PLATFORM.to_string()),
        );
        if let Some(release) = &config.release {
            self.body
                .insert("release".to_string(), Value::String(release.clone()));
        }
        if let Some(environment) = &config.environment {
            self.body
                .insert("environment".to_string(), Value::String(environment.clone()));
        }
        if let Some(server_name) = &config.server_name {
            self.body
                .insert("server_name".to_string(), Value::String(server_name.clone()));
        }
        let mut sdk = Map::new();
        sdk.insert("name".to_string(), Value::String(CLIENT_NAME.to_string()));
        sdk.insert(
            "version".to_string(),
            Value::String(env!("CARGO_PKG_VERSION").to_string()),
        );
        self.body.insert("sdk".to_string(), Value::Object(sdk));
    }

    #[inline]
    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    #[inline]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut body = self.body.clone();
        body.insert(
            "event_id".to_string(),
            Value::String(self.event_id.simple().to_string()),
        );
        body.insert(
            "timestamp".to_string(),
            Value::String(self.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string()),
        );
        serde_json::to_vec(&body)
    }
}
