/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

mod config;
pub use config::LogstashClientConfig;

mod connection;
pub use connection::LogstashConnection;

mod format;
pub use format::LogstashFormatter;

mod hook;
pub use hook::LogstashHook;

mod transport;
pub use transport::{Transport, UnknownTransport};

#[cfg(feature = "yaml")]
mod yaml;
