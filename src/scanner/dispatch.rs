//! Bounded worker pool that fans probes out and open ports back in.
//!
//! Ports travel coordinator -> workers over a closed, pre-loaded work queue;
//! open ports travel workers -> coordinator over a results queue. Both are
//! bounded `mpsc` channels sized to the port count, so no send ever waits.

use crate::error::{ScanError, ScanResult};
use crate::scanner::traits::SharedProber;
use crate::types::Port;
use futures::future::join_all;
use indicatif::ProgressBar;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::debug;

/// Receiving side of the work queue, shared by every worker.
pub type WorkQueue = Arc<Mutex<mpsc::Receiver<Port>>>;

/// Number of workers to start: never more than there are ports, never
/// more than the cap.
pub fn worker_count(port_count: usize, cap: usize) -> usize {
    port_count.min(cap)
}

/// Build a work queue pre-loaded with `ports` and closed for input.
///
/// Dropping the sender is the shutdown signal: once the queue drains,
/// `recv` returns `None` and workers exit.
pub fn load_work_queue(ports: &[Port]) -> ScanResult<WorkQueue> {
    let (tx, rx) = mpsc::channel(ports.len().max(1));
    for &port in ports {
        tx.try_send(port)
            .map_err(|e| ScanError::Queue(format!("work queue rejected port {port}: {e}")))?;
    }
    drop(tx);
    Ok(Arc::new(Mutex::new(rx)))
}

/// Result of draining a work queue through the worker pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    /// Ports that accepted a connection, in collection order.
    pub open: Vec<Port>,
    /// Workers that were started.
    pub workers: usize,
}

/// A running set of workers and the receiving side of their results queue.
pub struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
    results: mpsc::Receiver<Port>,
    workers: usize,
}

impl WorkerPool {
    /// Spawn `workers` workers over `queue`.
    ///
    /// A non-empty queue with no workers would never drain, so it is refused.
    pub fn start(
        prober: SharedProber,
        queue: WorkQueue,
        port_count: usize,
        workers: usize,
        progress: Option<ProgressBar>,
    ) -> ScanResult<Self> {
        if workers == 0 && port_count > 0 {
            return Err(ScanError::InvalidConfig(format!(
                "no workers to probe {port_count} ports"
            )));
        }

        let (results_tx, results) = mpsc::channel(port_count.max(1));

        debug!(host = prober.host(), workers, ports = port_count, "starting worker pool");

        let handles = (0..workers)
            .map(|id| {
                tokio::spawn(run_worker(
                    id,
                    Arc::clone(&prober),
                    Arc::clone(&queue),
                    results_tx.clone(),
                    progress.clone(),
                ))
            })
            .collect();

        Ok(Self {
            handles,
            results,
            workers,
        })
    }

    /// Number of workers that were started.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Wait for every worker to exit. The work queue is empty afterwards.
    pub async fn join(&mut self) -> ScanResult<()> {
        for joined in join_all(self.handles.drain(..)).await {
            joined.map_err(|e| ScanError::Worker(e.to_string()))?;
        }
        Ok(())
    }

    /// Drain the results queue, in collection order.
    ///
    /// Ends once every worker has dropped its sender.
    pub async fn collect(mut self) -> Vec<Port> {
        let mut open = Vec::new();
        while let Some(port) = self.results.recv().await {
            open.push(port);
        }
        open
    }
}

/// Run `workers` concurrent workers over `queue` and collect open ports.
///
/// Returns only after every worker has exited, so the queue is empty and
/// no result can arrive afterwards.
pub async fn dispatch(
    prober: SharedProber,
    queue: WorkQueue,
    port_count: usize,
    workers: usize,
    progress: Option<ProgressBar>,
) -> ScanResult<Dispatch> {
    let mut pool = WorkerPool::start(prober, queue, port_count, workers, progress)?;
    pool.join().await?;
    let workers = pool.workers();
    let open = pool.collect().await;

    Ok(Dispatch { open, workers })
}

/// Take ports from the queue until it is closed and drained.
async fn run_worker(
    id: usize,
    prober: SharedProber,
    queue: WorkQueue,
    results: mpsc::Sender<Port>,
    progress: Option<ProgressBar>,
) {
    let mut probed = 0usize;

    loop {
        let next = queue.lock().await.recv().await;
        let Some(port) = next else { break };

        probed += 1;
        let open = prober.probe(port).await;

        if let Some(ref pb) = progress {
            pb.inc(1);
            if open {
                pb.set_message(format!("found open port {port}"));
            }
        }

        if open && results.send(port).await.is_err() {
            break;
        }
    }

    debug!(worker = id, probed, "worker finished");
}
