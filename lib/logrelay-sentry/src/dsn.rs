/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

use super::CLIENT_NAME;

const SENTRY_PROTOCOL_VERSION: u8 = 7;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DsnError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("unsupported scheme {0}")]
    UnsupportedScheme(String),
    #[error("no public key")]
    MissingPublicKey,
    #[error("no host")]
    MissingHost,
    #[error("no project id")]
    MissingProjectId,
    #[error("invalid project id {0}")]
    InvalidProjectId(String),
}

/// The endpoint, credentials and project of a sentry server.
#[derive(Clone, PartialEq, Eq)]
pub struct SentryDsn {
    scheme: String,
    public_key: String,
    secret_key: Option<String>,
    host: String,
    port: Option<u16>,
    path: String,
    project_id: String,
}

impl SentryDsn {
    /// Build `https://<key>:<secret>@<host>/<project_id>`.
    pub fn new(
        public_key: &str,
        secret_key: &str,
        host: &str,
        project_id: &str,
    ) -> Result<Self, DsnError> {
        SentryDsn::with_scheme("https", public_key, secret_key, host, project_id)
    }

    pub fn with_scheme(
        scheme: &str,
        public_key: &str,
        secret_key: &str,
        host: &str,
        project_id: &str,
    ) -> Result<Self, DsnError> {
        if public_key.is_empty() {
            return Err(DsnError::MissingPublicKey);
        }
        if host.is_empty() {
            return Err(DsnError::MissingHost);
        }
        if project_id.is_empty() {
            return Err(DsnError::MissingProjectId);
        }
        let s = if secret_key.is_empty() {
            format!("{scheme}://{public_key}@{host}/{project_id}")
        } else {
            format!("{scheme}://{public_key}:{secret_key}@{host}/{project_id}")
        };
        SentryDsn::from_str(&s)
    }

    #[inline]
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    #[inline]
    pub fn secret_key(&self) -> Option<&str> {
        self.secret_key.as_deref()
    }

    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[inline]
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    fn write_base(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        f.write_str(&self.path)
    }

    pub fn store_url(&self) -> String {
        let mut s = String::with_capacity(64);
        let _ = self.write_base(&mut s);
        s.push_str("/api/");
        s.push_str(&self.project_id);
        s.push_str("/store/");
        s
    }

    /// Value of the `X-Sentry-Auth` header.
    pub fn auth_header(&self, timestamp: i64) -> String {
        let mut s = format!(
            "Sentry sentry_version={SENTRY_PROTOCOL_VERSION}, sentry_client={CLIENT_NAME}/{}, sentry_timestamp={timestamp}, sentry_key={}",
            env!("CARGO_PKG_VERSION"),
            self.public_key
        );
        if let Some(secret) = &self.secret_key {
            s.push_str(", sentry_secret=");
            s.push_str(secret);
        }
        s
    }
}

impl FromStr for SentryDsn {
    type Err = DsnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let url = Url::parse(s)?;

        let scheme = url.scheme();
        if scheme != "https" && scheme != "http" {
            return Err(DsnError::UnsupportedScheme(scheme.to_string()));
        }

        let public_key = url.username();
        if public_key.is_empty() {
            return Err(DsnError::MissingPublicKey);
        }
        let secret_key = url.password().filter(|s| !s.is_empty()).map(str::to_string);

        let host = match url.host_str() {
            Some(h) if !h.is_empty() => h.to_string(),
            _ => return Err(DsnError::MissingHost),
        };

        let path = url.path().trim_end_matches('/');
        let (path, project_id) = match path.rsplit_once('/') {
            Some((prefix, id)) if !id.is_empty() => (prefix, id),
            _ => return Err(DsnError::MissingProjectId),
        };
        if !project_id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DsnError::InvalidProjectId(project_id.to_string()));
        }

        Ok(SentryDsn {
            scheme: scheme.to_string(),
            public_key: public_key.to_string(),
            secret_key,
            host,
            port: url.port(),
            path: path.to_string(),
            project_id: project_id.to_string(),
        })
    }
}

/// The secret key is never displayed.
impl fmt::Display for SentryDsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.public_key)?;
        if self.secret_key.is_some() {
            f.write_str(":***")?;
        }
        write!(f, "@{}", self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        write!(f, "{}/{}", self.path, self.project_id)
    }
}

impl fmt::Debug for SentryDsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SentryDsn({self})")
    }
}
