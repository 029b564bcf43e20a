//! Prober trait abstraction and scan configuration.
//!
//! The dispatcher only knows how to ask "did this port accept a
//! connection?"; how that question is answered lives behind `Prober`.

use crate::config::Settings;
use crate::types::Port;
use async_trait::async_trait;
use indicatif::ProgressBar;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Trait for single-port probe implementations.
///
/// A probe reports success only. Every failure mode (timeout, refusal,
/// unreachable host, DNS failure) is reported as `false`, because a
/// connect scan cannot tell a closed port from a filtered one.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probe one port, returning `true` if it accepted a connection.
    async fn probe(&self, port: Port) -> bool;

    /// The host this prober targets.
    fn host(&self) -> &str;
}

/// A shared prober for use across worker tasks.
pub type SharedProber = Arc<dyn Prober>;

/// Configuration for a scan run.
#[derive(Clone)]
pub struct ScanConfig {
    /// Host name or address to scan.
    pub host: String,
    /// Port specification string; empty means every port.
    pub ports: String,
    /// Per-probe timeout.
    pub timeout: Duration,
    /// Explicit cap on concurrent workers, replacing the parallelism-derived one.
    pub max_workers: Option<usize>,
    /// Reject explicit ports outside 1-65535 instead of passing them through.
    pub strict_ports: bool,
    /// Progress reporting, one tick per probed port.
    pub progress: Option<ProgressBar>,
    /// Process-wide defaults.
    pub settings: Settings,
}

impl ScanConfig {
    /// Create a new scan configuration with default settings.
    pub fn new(host: impl Into<String>, ports: impl Into<String>) -> Self {
        let settings = Settings::default();
        Self {
            host: host.into(),
            ports: ports.into(),
            timeout: settings.timeout(),
            max_workers: None,
            strict_ports: false,
            progress: None,
            settings,
        }
    }

    /// Set the per-probe timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the worker cap.
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = Some(max_workers);
        self
    }

    /// Reject out-of-range explicit ports.
    pub fn with_strict_ports(mut self) -> Self {
        self.strict_ports = true;
        self
    }

    /// Report progress on the given bar.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Replace the process-wide defaults.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// The worker cap in effect before the port count is considered.
    pub fn worker_cap(&self) -> usize {
        self.max_workers.unwrap_or_else(|| self.settings.worker_cap())
    }
}

impl fmt::Debug for ScanConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanConfig")
            .field("host", &self.host)
            .field("ports", &self.ports)
            .field("timeout", &self.timeout)
            .field("max_workers", &self.max_workers)
            .field("strict_ports", &self.strict_ports)
            .field("progress", &self.progress.is_some())
            .field("settings", &self.settings)
            .finish()
    }
}
