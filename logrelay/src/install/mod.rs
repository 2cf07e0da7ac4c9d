/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;

use slog::warn;

use crate::{LoggerHandle, registry};

mod logstash;
pub use logstash::{add_logstash_hook, add_logstash_hook_to};

mod sentry;
pub use sentry::{add_sentry_hook, add_sentry_hook_to};

/// The published handle, or a default one that nobody else will see.
fn install_target(hook_kind: &str) -> Arc<LoggerHandle> {
    match registry::published() {
        Some(handle) => handle,
        None => {
            let handle = Arc::new(LoggerHandle::default());
            warn!(
                handle.logger(),
                "no logger handle is published, the {} hook will be dropped", hook_kind
            );
            handle
        }
    }
}
