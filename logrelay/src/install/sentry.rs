/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;
use std::time::Duration;

use slog::{error, info};

use logrelay_sentry::{SentryClient, SentryClientConfig, SentryHook};
use logrelay_types::log::Severity;

use crate::{HookError, HookStatus, LoggerHandle};

const SENTRY_HOOK_LEVELS: [Severity; 3] = [Severity::Error, Severity::Fatal, Severity::Panic];
const SENTRY_HOOK_TIMEOUT: Duration = Duration::from_secs(5);

impl LoggerHandle {
    /// Build a sentry client from `config` and attach a hook for error and above.
    pub fn add_sentry_hook(&self, config: &SentryClientConfig) -> HookStatus {
        info!(
            self.logger(),
            "adding hook to logger to url \"{}\"",
            config.dsn()
        );
        match SentryClient::new(config.clone()) {
            Ok(client) => self.add_sentry_hook_with_client(client),
            Err(e) => {
                let reason = format!("{e:#}");
                error!(
                    self.logger(),
                    "error getting new sentry client instance: {}", reason
                );
                HookError::Client(reason).into()
            }
        }
    }

    pub fn add_sentry_hook_with_client(&self, client: SentryClient) -> HookStatus {
        let stacktrace = client.config().stacktrace();
        let timeout = client.config().timeout();

        let mut hook = match SentryHook::new(client, &SENTRY_HOOK_LEVELS) {
            Ok(hook) => hook,
            Err(e) => {
                let reason = format!("{e:#}");
                error!(
                    self.logger(),
                    "error creating a hook using an initialized client: {}", reason
                );
                return HookError::Hook(reason).into();
            }
        };
        if stacktrace {
            hook.enable_stacktrace();
        }
        hook.set_timeout(timeout);

        self.add_hook(Arc::new(hook));
        HookStatus::Attached
    }
}

/// Add a sentry hook to the currently published handle.
///
/// If no handle is published, the hook goes to a temporary default handle and
/// is dropped on return, even though `Attached` is reported.
pub fn add_sentry_hook(
    api_key: &str,
    secret: &str,
    host: &str,
    project_id: &str,
    release: &str,
    environment: &str,
) -> HookStatus {
    let handle = super::install_target("sentry");
    add_sentry_hook_to(
        &handle,
        api_key,
        secret,
        host,
        project_id,
        release,
        environment,
    )
}

/// Stack traces are always captured and each submission times out after 5s.
pub fn add_sentry_hook_to(
    handle: &LoggerHandle,
    api_key: &str,
    secret: &str,
    host: &str,
    project_id: &str,
    release: &str,
    environment: &str,
) -> HookStatus {
    let mut config = match SentryClientConfig::from_parts(
        api_key,
        secret,
        host,
        project_id,
        release,
        environment,
    ) {
        Ok(config) => config,
        Err(e) => {
            error!(handle.logger(), "error setting sentry dsn: {}", e);
            return HookError::Client(e.to_string()).into();
        }
    };
    config.set_stacktrace(true);
    config.set_timeout(SENTRY_HOOK_TIMEOUT);
    handle.add_sentry_hook(&config)
}
