/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use super::{ReqwestTransport, SentryClientConfig, SentryEvent, SentryRequest, SentryTransport};

/// A sentry client owned by its caller, there is no process-wide default.
#[derive(Clone)]
pub struct SentryClient {
    config: SentryClientConfig,
    store_url: String,
    transport: Arc<dyn SentryTransport>,
}

impl SentryClient {
    pub fn new(config: SentryClientConfig) -> anyhow::Result<Self> {
        let transport = ReqwestTransport::new()?;
        Ok(SentryClient::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: SentryClientConfig, transport: Arc<dyn SentryTransport>) -> Self {
        let store_url = config.dsn().store_url();
        SentryClient {
            config,
            store_url,
            transport,
        }
    }

    #[inline]
    pub fn config(&self) -> &SentryClientConfig {
        &self.config
    }

    /// Submit the event synchronously, bounded by `timeout`.
    ///
    /// Returns the size of the submitted body.
    pub fn capture(&self, event: &SentryEvent, timeout: Duration) -> anyhow::Result<usize> {
        let body = event.to_json().context("failed to encode event")?;
        let size = body.len();
        let req = SentryRequest {
            url: self.store_url.clone(),
            auth: self.config.dsn().auth_header(event.timestamp().timestamp()),
            body,
            timeout,
        };
        self.transport
            .send(&req)
            .context(format!("failed to submit event {}", event.event_id().simple()))?;
        Ok(size)
    }
}
