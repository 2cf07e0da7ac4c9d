/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::net::{IpAddr, Ipv6Addr, SocketAddr, ToSocketAddrs};
use std::time::Duration;

use anyhow::{Context, anyhow};

use super::{LogstashConnection, Transport};

const LOGSTASH_DEFAULT_HOST: &str = "127.0.0.1";
const LOGSTASH_DEFAULT_PORT: u16 = 5000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogstashClientConfig {
    host: String,
    port: u16,
    transport: Transport,
    bind_ip: Option<IpAddr>,
    connect_timeout: Duration,
    write_timeout: Duration,
    self_test_timeout: Duration,
    pub(crate) type_name: Option<String>,
}

impl Default for LogstashClientConfig {
    fn default() -> Self {
        LogstashClientConfig::new(LOGSTASH_DEFAULT_HOST, LOGSTASH_DEFAULT_PORT, Transport::Tcp)
    }
}

impl LogstashClientConfig {
    pub fn new(host: &str, port: u16, transport: Transport) -> Self {
        LogstashClientConfig {
            host: host.to_string(),
            port,
            transport,
            bind_ip: None,
            connect_timeout: Duration::from_secs(10),
            write_timeout: Duration::from_secs(1),
            self_test_timeout: Duration::from_secs(5),
            type_name: None,
        }
    }

    pub fn set_host(&mut self, host: &str) {
        self.host = host.to_string();
    }

    pub fn set_port(&mut self, port: u16) {
        self.port = port;
    }

    pub fn set_transport(&mut self, transport: Transport) {
        self.transport = transport;
    }

    /// Local address for udp sockets.
    pub fn set_bind_ip(&mut self, ip: IpAddr) {
        self.bind_ip = Some(ip);
    }

    pub fn set_connect_timeout(&mut self, timeout: Duration) {
        self.connect_timeout = timeout;
    }

    pub fn set_write_timeout(&mut self, timeout: Duration) {
        self.write_timeout = timeout;
    }

    pub fn set_self_test_timeout(&mut self, timeout: Duration) {
        self.self_test_timeout = timeout;
    }

    pub fn set_type_name(&mut self, name: &str) {
        self.type_name = Some(name.to_string());
    }

    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[inline]
    pub fn port(&self) -> u16 {
        self.port
    }

    #[inline]
    pub fn transport(&self) -> Transport {
        self.transport
    }

    #[inline]
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    #[inline]
    pub fn write_timeout(&self) -> Duration {
        self.write_timeout
    }

    #[inline]
    pub fn self_test_timeout(&self) -> Duration {
        self.self_test_timeout
    }

    /// The `host:port` form, with ipv6 literals in brackets.
    pub fn server_addr_str(&self) -> String {
        if self.host.parse::<Ipv6Addr>().is_ok() {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    pub fn resolve(&self) -> anyhow::Result<SocketAddr> {
        let addrs = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| anyhow!("failed to resolve {}: {e}", self.server_addr_str()))?;
        let mut found = false;
        for addr in addrs {
            found = true;
            if self.transport.accepts(&addr) {
                return Ok(addr);
            }
        }
        if found {
            Err(anyhow!(
                "no {} address found for {}",
                self.transport.family(),
                self.server_addr_str()
            ))
        } else {
            Err(anyhow!("no address found for {}", self.server_addr_str()))
        }
    }

    pub fn connect(&self) -> anyhow::Result<LogstashConnection> {
        let server = self.resolve()?;
        let conn = if self.transport.is_stream() {
            LogstashConnection::tcp(server, self.connect_timeout)
                .map_err(|e| anyhow!("failed to tcp connect to peer {server}: {e}"))?
        } else {
            LogstashConnection::udp(self.bind_ip, server)
                .map_err(|e| anyhow!("failed to setup udp socket to peer {server}: {e}"))?
        };
        conn.set_write_timeout(Some(self.write_timeout))
            .context("failed to set write timeout")?;
        Ok(conn)
    }
}
