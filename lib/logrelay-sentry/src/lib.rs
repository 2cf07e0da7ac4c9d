/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

const CLIENT_NAME: &str = "logrelay";

mod dsn;
pub use dsn::{DsnError, SentryDsn};

mod config;
pub use config::SentryClientConfig;

mod transport;
pub use transport::{ReqwestTransport, SentryRequest, SentryTransport};

mod event;
pub use event::SentryEvent;

mod client;
pub use client::SentryClient;

mod hook;
pub use hook::SentryHook;

#[cfg(feature = "yaml")]
mod yaml;
