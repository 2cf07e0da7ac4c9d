/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::str::FromStr;

use anyhow::{Context, anyhow};
use url::{Host, Url};
use yaml_rust::Yaml;

use super::{LogstashClientConfig, Transport};

impl LogstashClientConfig {
    /// Parse from a map, or from a `<transport>://<host>[:<port>]` string.
    pub fn parse_yaml(value: &Yaml) -> anyhow::Result<Self> {
        match value {
            Yaml::Hash(map) => {
                let mut config = LogstashClientConfig::default();
                logrelay_yaml::foreach_kv(map, |k, v| config.set_by_yaml_kv(k, v))?;
                Ok(config)
            }
            Yaml::String(s) => LogstashClientConfig::from_url_str(s),
            _ => Err(anyhow!(
                "yaml value type for 'LogstashClientConfig' should be 'map' or 'string'"
            )),
        }
    }

    pub fn set_by_yaml_kv(&mut self, k: &str, v: &Yaml) -> anyhow::Result<()> {
        match logrelay_yaml::key::normalize(k).as_str() {
            "host" | "server" => {
                let host = logrelay_yaml::value::as_string(v)
                    .context(format!("invalid string value for key {k}"))?;
                if host.is_empty() {
                    return Err(anyhow!("empty host"));
                }
                self.set_host(&host);
                Ok(())
            }
            "port" => {
                let port = logrelay_yaml::value::as_u16(v)
                    .context(format!("invalid u16 value for key {k}"))?;
                self.set_port(port);
                Ok(())
            }
            "protocol" | "transport" => {
                let s = logrelay_yaml::value::as_string(v)
                    .context(format!("invalid string value for key {k}"))?;
                self.set_transport(Transport::from_str(&s)?);
                Ok(())
            }
            "bind_ip" => {
                let ip = logrelay_yaml::value::as_ip_addr(v)
                    .context(format!("invalid ip address value for key {k}"))?;
                self.set_bind_ip(ip);
                Ok(())
            }
            "connect_timeout" => {
                let timeout = logrelay_yaml::humanize::as_duration(v)
                    .context(format!("invalid humanize duration value for key {k}"))?;
                self.set_connect_timeout(timeout);
                Ok(())
            }
            "write_timeout" => {
                let timeout = logrelay_yaml::humanize::as_duration(v)
                    .context(format!("invalid humanize duration value for key {k}"))?;
                self.set_write_timeout(timeout);
                Ok(())
            }
            "self_test_timeout" => {
                let timeout = logrelay_yaml::humanize::as_duration(v)
                    .context(format!("invalid humanize duration value for key {k}"))?;
                self.set_self_test_timeout(timeout);
                Ok(())
            }
            "type" | "type_name" => {
                let name = logrelay_yaml::value::as_string(v)
                    .context(format!("invalid string value for key {k}"))?;
                self.set_type_name(&name);
                Ok(())
            }
            _ => Err(anyhow!("invalid key {k}")),
        }
    }

    fn from_url_str(s: &str) -> anyhow::Result<Self> {
        let url = Url::parse(s).map_err(|e| anyhow!("invalid url {s}: {e}"))?;
        let transport = Transport::from_str(url.scheme())?;
        let host = match url.host() {
            Some(Host::Domain(domain)) => domain.to_string(),
            Some(Host::Ipv4(ip)) => ip.to_string(),
            Some(Host::Ipv6(ip)) => ip.to_string(),
            None => return Err(anyhow!("no host found in url {s}")),
        };
        let mut config = LogstashClientConfig::default();
        config.set_host(&host);
        config.set_transport(transport);
        if let Some(port) = url.port() {
            config.set_port(port);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use logrelay_yaml::{yaml_doc, yaml_str};
    use yaml_rust::YamlLoader;

    #[test]
    fn parse_map() {
        let yaml = yaml_doc!(
            r#"
                host: logs.example.net
                port: 5044
                protocol: udp4
                connect-timeout: 3s
                write_timeout: 500ms
                self_test_timeout: 2
                type: relay
            "#
        );
        let config = LogstashClientConfig::parse_yaml(&yaml).unwrap();
        assert_eq!(config.host(), "logs.example.net");
        assert_eq!(config.port(), 5044);
        assert_eq!(config.transport(), Transport::Udp4);
        assert_eq!(config.connect_timeout(), Duration::from_secs(3));
        assert_eq!(config.write_timeout(), Duration::from_millis(500));
        assert_eq!(config.self_test_timeout(), Duration::from_secs(2));
        assert_eq!(config.type_name.as_deref(), Some("relay"));
    }

    #[test]
    fn parse_map_err() {
        let yaml = yaml_doc!("protocol: unix");
        assert!(LogstashClientConfig::parse_yaml(&yaml).is_err());

        let yaml = yaml_doc!("hostname: logs.example.net");
        assert!(LogstashClientConfig::parse_yaml(&yaml).is_err());

        let yaml = yaml_doc!("port: 70000");
        assert!(LogstashClientConfig::parse_yaml(&yaml).is_err());
    }

    #[test]
    fn parse_url() {
        let config = LogstashClientConfig::parse_yaml(&yaml_str!("tcp://10.0.0.2:5000")).unwrap();
        assert_eq!(config.host(), "10.0.0.2");
        assert_eq!(config.port(), 5000);
        assert_eq!(config.transport(), Transport::Tcp);

        let config = LogstashClientConfig::parse_yaml(&yaml_str!("udp6://[::1]:5044")).unwrap();
        assert_eq!(config.host(), "::1");
        assert_eq!(config.server_addr_str(), "[::1]:5044");
        assert_eq!(config.transport(), Transport::Udp6);

        assert!(LogstashClientConfig::parse_yaml(&yaml_str!("http://10.0.0.2:5000")).is_err());
        assert!(LogstashClientConfig::parse_yaml(&Yaml::Integer(1)).is_err());
    }
}
