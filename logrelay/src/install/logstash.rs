/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::str::FromStr;
use std::sync::Arc;

use slog::{error, info};

use logrelay_logstash::{LogstashClientConfig, LogstashHook, Transport};
use logrelay_types::log::Severity;

use crate::{HookError, HookStatus, LoggerHandle};

impl LoggerHandle {
    /// Dial logstash, run the self test and attach the hook.
    ///
    /// Nothing is retried. Every failure is logged and skips the hook.
    pub fn add_logstash_hook(&self, config: &LogstashClientConfig, level: Severity) -> HookStatus {
        let logger = self.logger();
        let addr = config.server_addr_str();

        let hook = match LogstashHook::connect(config, level) {
            Ok(hook) => hook,
            Err(e) => {
                let reason = format!("{e:#}");
                error!(logger, "error dialing logstash ({}): {}", addr, reason);
                return HookError::Dial { addr, reason }.into();
            }
        };
        info!(
            logger,
            "establish {} connection on {}",
            config.transport(),
            addr
        );

        if let Err(e) = hook.self_test(config.self_test_timeout()) {
            let reason = format!("{e:#}");
            error!(logger, "error firing logstash hook: {}", reason);
            hook.close();
            return HookError::SelfTest(reason).into();
        }

        info!(logger, "add hook for logstash with level \"{}\"", level);
        self.add_hook(Arc::new(hook));
        HookStatus::Attached
    }
}

/// Add a logstash hook to the currently published handle.
///
/// If no handle is published, the hook goes to a temporary default handle and
/// is dropped on return, even though `Attached` is reported.
pub fn add_logstash_hook(host: &str, port: u16, protocol: &str, level_index: usize) -> HookStatus {
    let handle = super::install_target("logstash");
    add_logstash_hook_to(&handle, host, port, protocol, level_index)
}

pub fn add_logstash_hook_to(
    handle: &LoggerHandle,
    host: &str,
    port: u16,
    protocol: &str,
    level_index: usize,
) -> HookStatus {
    let level = match Severity::from_index(level_index) {
        Ok(level) => level,
        Err(e) => {
            error!(handle.logger(), "invalid logstash hook level: {}", e);
            return HookError::from(e).into();
        }
    };
    let transport = match Transport::from_str(protocol) {
        Ok(transport) => transport,
        Err(e) => {
            error!(handle.logger(), "error dialing logstash: {}", e);
            return HookError::from(e).into();
        }
    };

    let config = LogstashClientConfig::new(host, port, transport);
    handle.add_logstash_hook(&config, level)
}
