//! Scanner module - coordinates a scan run.
//!
//! The coordinator resolves the port specification, loads the work queue,
//! hands it to the dispatcher's worker pool and sorts what comes back.

pub mod dispatch;
pub mod tcp;
pub mod traits;

use crate::error::{ScanError, ScanResult};
use crate::types::{self, Port};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

pub use dispatch::{dispatch, load_work_queue, worker_count, Dispatch, WorkQueue, WorkerPool};
pub use tcp::TcpConnectProber;
pub use traits::{Prober, ScanConfig, SharedProber};

/// Lifecycle of a single scan run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Idle,
    Resolving,
    Dispatching,
    Collecting,
    Sorted,
    Done,
    Failed,
}

impl ScanPhase {
    /// Check if the run has reached a terminal phase.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Resolving => "resolving",
            Self::Dispatching => "dispatching",
            Self::Collecting => "collecting",
            Self::Sorted => "sorted",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        write!(f, "{name}")
    }
}

/// Complete scan results.
///
/// Open ports are held ascending; duplicates survive if the port list had
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanOutcome {
    host: String,
    ports_scanned: usize,
    open_ports: Vec<Port>,
    count: usize,
    duration_ms: u64,
}

impl ScanOutcome {
    /// Build an outcome, sorting the collected ports.
    pub fn new(host: impl Into<String>, ports_scanned: usize, mut open_ports: Vec<Port>) -> Self {
        open_ports.sort();
        Self {
            host: host.into(),
            ports_scanned,
            count: open_ports.len(),
            open_ports,
            duration_ms: 0,
        }
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Number of ports probed, duplicates included.
    pub fn ports_scanned(&self) -> usize {
        self.ports_scanned
    }

    pub fn open_ports(&self) -> &[Port] {
        &self.open_ports
    }

    /// Number of open ports found.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }
}

/// Drives one scan from port specification to sorted outcome.
pub struct Coordinator {
    config: ScanConfig,
    phase: ScanPhase,
    workers: usize,
}

impl Coordinator {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            phase: ScanPhase::Idle,
            workers: 0,
        }
    }

    /// Current phase of the run.
    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    /// Workers started by the last run.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run the scan with a TCP connect prober.
    pub async fn run(&mut self) -> ScanResult<ScanOutcome> {
        let prober: SharedProber = Arc::new(TcpConnectProber::new(
            self.config.host.clone(),
            self.config.timeout,
        ));
        self.run_with(prober).await
    }

    /// Run the scan with the given prober.
    pub async fn run_with(&mut self, prober: SharedProber) -> ScanResult<ScanOutcome> {
        let result = self.execute(prober).await;
        if result.is_err() {
            self.transition(ScanPhase::Failed);
        }
        result
    }

    async fn execute(&mut self, prober: SharedProber) -> ScanResult<ScanOutcome> {
        let start_time = Instant::now();
        self.validate()?;

        self.transition(ScanPhase::Resolving);
        let ports = if self.config.strict_ports {
            types::resolve_strict(&self.config.ports)?
        } else {
            types::resolve(&self.config.ports)?
        };

        self.transition(ScanPhase::Dispatching);
        let queue = load_work_queue(&ports)?;
        let workers = worker_count(ports.len(), self.config.worker_cap());
        if let Some(ref pb) = self.config.progress {
            pb.set_length(ports.len() as u64);
        }
        let mut pool = WorkerPool::start(
            prober,
            queue,
            ports.len(),
            workers,
            self.config.progress.clone(),
        )?;
        self.workers = pool.workers();
        pool.join().await?;

        self.transition(ScanPhase::Collecting);
        let open = pool.collect().await;

        self.transition(ScanPhase::Sorted);
        let outcome = ScanOutcome::new(self.config.host.clone(), ports.len(), open)
            .with_duration_ms(start_time.elapsed().as_millis() as u64);

        if let Some(ref pb) = self.config.progress {
            pb.finish_with_message("scan complete");
        }
        self.transition(ScanPhase::Done);
        Ok(outcome)
    }

    fn validate(&self) -> ScanResult<()> {
        if self.config.host.is_empty() {
            return Err(ScanError::InvalidConfig("host must not be empty".to_string()));
        }
        if self.config.timeout.is_zero() {
            return Err(ScanError::InvalidConfig("timeout must be positive".to_string()));
        }
        if self.config.worker_cap() == 0 {
            return Err(ScanError::InvalidConfig(
                "concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn transition(&mut self, next: ScanPhase) {
        debug!(from = %self.phase, to = %next, "scan phase");
        self.phase = next;
    }
}

/// Execute a complete TCP connect scan.
pub async fn run_scan(config: ScanConfig) -> ScanResult<ScanOutcome> {
    Coordinator::new(config).run().await
}
