/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported logstash transport {0}")]
pub struct UnknownTransport(pub String);

/// Network used to reach the logstash input.
///
/// The numbered variants restrict the peer address family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Transport {
    #[default]
    Tcp,
    Tcp4,
    Tcp6,
    Udp,
    Udp4,
    Udp6,
}

impl Transport {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Transport::Tcp => "tcp",
            Transport::Tcp4 => "tcp4",
            Transport::Tcp6 => "tcp6",
            Transport::Udp => "udp",
            Transport::Udp4 => "udp4",
            Transport::Udp6 => "udp6",
        }
    }

    pub const fn is_stream(&self) -> bool {
        matches!(self, Transport::Tcp | Transport::Tcp4 | Transport::Tcp6)
    }

    pub fn accepts(&self, addr: &SocketAddr) -> bool {
        match self {
            Transport::Tcp | Transport::Udp => true,
            Transport::Tcp4 | Transport::Udp4 => addr.is_ipv4(),
            Transport::Tcp6 | Transport::Udp6 => addr.is_ipv6(),
        }
    }

    pub(crate) fn family(&self) -> &'static str {
        match self {
            Transport::Tcp | Transport::Udp => "ip",
            Transport::Tcp4 | Transport::Udp4 => "ipv4",
            Transport::Tcp6 | Transport::Udp6 => "ipv6",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Transport {
    type Err = UnknownTransport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tcp" => Ok(Transport::Tcp),
            "tcp4" => Ok(Transport::Tcp4),
            "tcp6" => Ok(Transport::Tcp6),
            "udp" => Ok(Transport::Udp),
            "udp4" => Ok(Transport::Udp4),
            "udp6" => Ok(Transport::Udp6),
            _ => Err(UnknownTransport(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        assert_eq!(Transport::from_str("TCP").unwrap(), Transport::Tcp);
        assert_eq!(Transport::from_str("udp6").unwrap(), Transport::Udp6);
        assert_eq!(
            Transport::from_str("unix"),
            Err(UnknownTransport("unix".to_string()))
        );
        assert!(Transport::from_str("").is_err());
    }

    #[test]
    fn family() {
        let v4 = SocketAddr::from(([127, 0, 0, 1], 5000));
        let v6 = SocketAddr::from(([0, 0, 0, 0, 0, 0, 0, 1], 5000));
        assert!(Transport::Tcp.accepts(&v4));
        assert!(Transport::Udp.accepts(&v6));
        assert!(Transport::Tcp4.accepts(&v4));
        assert!(!Transport::Tcp4.accepts(&v6));
        assert!(!Transport::Udp6.accepts(&v4));
        assert!(Transport::Tcp6.is_stream());
        assert!(!Transport::Udp4.is_stream());
    }
}
