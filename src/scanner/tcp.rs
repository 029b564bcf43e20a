//! TCP connect prober.
//!
//! Performs a full TCP handshake using the operating system's socket API.
//! Needs no privileges, and the target sees every attempt.

use crate::error::ProbeError;
use crate::scanner::traits::Prober;
use crate::types::Port;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

/// TCP connect prober.
///
/// The host is resolved as part of each attempt, so name resolution counts
/// against the per-probe timeout and a resolution failure is simply a
/// failed probe.
pub struct TcpConnectProber {
    host: String,
    timeout: Duration,
}

impl TcpConnectProber {
    /// Create a new TCP connect prober.
    ///
    /// # Arguments
    /// * `host` - Host name or IP address to connect to
    /// * `timeout` - Bound on each connection attempt
    pub fn new(host: impl Into<String>, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            timeout,
        }
    }

    /// Attempt to connect to `host:port` within the timeout.
    async fn attempt_connect(&self, port: Port) -> Result<TcpStream, ProbeError> {
        let port_num = port
            .as_u16()
            .ok_or(ProbeError::Unaddressable(port.value()))?;

        match timeout(self.timeout, TcpStream::connect((self.host.as_str(), port_num))).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(e)) => Err(match e.kind() {
                ErrorKind::ConnectionRefused => ProbeError::Refused,
                ErrorKind::HostUnreachable | ErrorKind::NetworkUnreachable => {
                    ProbeError::Unreachable(e.to_string())
                }
                _ => ProbeError::Io(e),
            }),
            Err(_) => Err(ProbeError::Timeout),
        }
    }
}

#[async_trait]
impl Prober for TcpConnectProber {
    async fn probe(&self, port: Port) -> bool {
        match self.attempt_connect(port).await {
            Ok(stream) => {
                // Closing is best effort; the port already counts as open.
                drop(stream);
                true
            }
            Err(e) => {
                trace!(host = %self.host, %port, error = %e, "probe failed");
                false
            }
        }
    }

    fn host(&self) -> &str {
        &self.host
    }
}
