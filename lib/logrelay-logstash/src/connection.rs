/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io::{self, Write};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, Shutdown, SocketAddr, TcpStream, UdpSocket};
use std::time::Duration;

pub enum LogstashConnection {
    Tcp(TcpStream),
    Udp(UdpSocket),
}

impl LogstashConnection {
    pub(crate) fn tcp(server: SocketAddr, timeout: Duration) -> io::Result<Self> {
        let stream = TcpStream::connect_timeout(&server, timeout)?;
        stream.set_nodelay(true)?;
        Ok(LogstashConnection::Tcp(stream))
    }

    pub(crate) fn udp(bind_ip: Option<IpAddr>, server: SocketAddr) -> io::Result<Self> {
        let bind_addr = match bind_ip {
            Some(ip) => SocketAddr::new(ip, 0),
            None if server.is_ipv4() => SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0),
            None => SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0),
        };
        let sock = UdpSocket::bind(bind_addr)?;
        sock.connect(server)?;
        Ok(LogstashConnection::Udp(sock))
    }

    pub fn peer_addr(&self) -> io::Result<SocketAddr> {
        match self {
            LogstashConnection::Tcp(s) => s.peer_addr(),
            LogstashConnection::Udp(s) => s.peer_addr(),
        }
    }

    pub fn set_write_timeout(&self, timeout: Option<Duration>) -> io::Result<()> {
        match self {
            LogstashConnection::Tcp(s) => s.set_write_timeout(timeout),
            LogstashConnection::Udp(s) => s.set_write_timeout(timeout),
        }
    }

    /// Send one complete event, datagrams are never split.
    pub fn send(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            LogstashConnection::Tcp(s) => {
                s.write_all(buf)?;
                s.flush()
            }
            LogstashConnection::Udp(s) => {
                let nw = s.send(buf)?;
                if nw != buf.len() {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        format!("partial datagram sent: {nw}/{}", buf.len()),
                    ));
                }
                Ok(())
            }
        }
    }

    pub fn shutdown(&self) {
        if let LogstashConnection::Tcp(s) = self {
            let _ = s.shutdown(Shutdown::Both);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::net::TcpListener;

    #[test]
    fn tcp_send() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let server = listener.local_addr().unwrap();

        let mut conn = LogstashConnection::tcp(server, Duration::from_secs(1)).unwrap();
        assert_eq!(conn.peer_addr().unwrap(), server);
        let (mut peer, _) = listener.accept().unwrap();

        conn.send(b"{}\n").unwrap();
        conn.shutdown();

        let mut received = String::new();
        peer.read_to_string(&mut received).unwrap();
        assert_eq!(received, "{}\n");
    }

    #[test]
    fn udp_send() {
        let peer = UdpSocket::bind("127.0.0.1:0").unwrap();
        let server = peer.local_addr().unwrap();

        let mut conn = LogstashConnection::udp(None, server).unwrap();
        conn.set_write_timeout(Some(Duration::from_secs(1))).unwrap();
        conn.send(b"{\"message\":\"hi\"}\n").unwrap();

        let mut buf = [0u8; 64];
        peer.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
        let n = peer.recv(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"{\"message\":\"hi\"}\n");
    }
}
