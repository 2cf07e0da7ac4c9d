/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::time::Duration;

use super::{DsnError, SentryDsn};

#[derive(Clone, Debug)]
pub struct SentryClientConfig {
    dsn: SentryDsn,
    pub(crate) release: Option<String>,
    pub(crate) environment: Option<String>,
    pub(crate) server_name: Option<String>,
    pub(crate) timeout: Duration,
    pub(crate) stacktrace: bool,
}

impl SentryClientConfig {
    pub fn new(dsn: SentryDsn) -> Self {
        SentryClientConfig {
            dsn,
            release: None,
            environment: None,
            server_name: None,
            timeout: Duration::from_secs(5),
            stacktrace: true,
        }
    }

    /// Build from the separate DSN parts, empty release and environment are ignored.
    pub fn from_parts(
        api_key: &str,
        secret: &str,
        host: &str,
        project_id: &str,
        release: &str,
        environment: &str,
    ) -> Result<Self, DsnError> {
        let dsn = SentryDsn::new(api_key, secret, host, project_id)?;
        let mut config = SentryClientConfig::new(dsn);
        config.set_release(release);
        config.set_environment(environment);
        Ok(config)
    }

    #[inline]
    pub fn dsn(&self) -> &SentryDsn {
        &self.dsn
    }

    pub fn set_release(&mut self, release: &str) {
        self.release = (!release.is_empty()).then(|| release.to_string());
    }

    pub fn set_environment(&mut self, environment: &str) {
        self.environment = (!environment.is_empty()).then(|| environment.to_string());
    }

    pub fn set_server_name(&mut self, name: &str) {
        self.server_name = (!name.is_empty()).then(|| name.to_string());
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    pub fn set_stacktrace(&mut self, enable: bool) {
        self.stacktrace = enable;
    }

    #[inline]
    pub fn release(&self) -> Option<&str> {
        self.release.as_deref()
    }

    #[inline]
    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[inline]
    pub fn stacktrace(&self) -> bool {
        self.stacktrace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts() {
        let config =
            SentryClientConfig::from_parts("abc", "def", "sentry.example.com", "42", "1.0.0", "")
                .unwrap();
        assert_eq!(config.dsn().project_id(), "42");
        assert_eq!(config.release(), Some("1.0.0"));
        assert_eq!(config.environment(), None);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(config.stacktrace());

        assert!(
            SentryClientConfig::from_parts("abc", "def", "sentry.example.com", "", "", "").is_err()
        );
    }
}
