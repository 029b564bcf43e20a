//! Scan defaults and host-derived limits.

use std::num::NonZeroUsize;
use std::thread;
use std::time::Duration;

/// Default per-probe timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 500;

/// Concurrent workers allowed per unit of available parallelism.
///
/// Probes spend nearly all their time waiting on the network, so the pool
/// oversubscribes the CPU heavily while still bounding open sockets.
pub const WORKERS_PER_CORE: usize = 20;

/// Number of tasks the host can run in parallel, or 1 if unknown.
pub fn available_parallelism() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Settings shared by every scan in this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Per-probe timeout in milliseconds.
    pub timeout_ms: u64,
    /// Workers per unit of available parallelism.
    pub workers_per_core: usize,
    /// Parallelism reported by the host.
    pub parallelism: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            workers_per_core: WORKERS_PER_CORE,
            parallelism: available_parallelism(),
        }
    }
}

impl Settings {
    /// Per-probe timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Upper bound on concurrent workers before the port count is considered.
    pub fn worker_cap(&self) -> usize {
        self.parallelism.max(1).saturating_mul(self.workers_per_core)
    }
}
