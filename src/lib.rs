//! # portsweep - a concurrent TCP connect port scanner
//!
//! Given a host and a port specification, portsweep probes every port with
//! a bounded pool of async workers and reports the ports that accepted a
//! TCP connection within the timeout, in ascending order.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use portsweep::scanner::{run_scan, ScanConfig};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ScanConfig::new("127.0.0.1", "20-25,80,443")
//!         .with_timeout(Duration::from_millis(500));
//!     let outcome = run_scan(config).await.unwrap();
//!
//!     for port in outcome.open_ports() {
//!         println!("Port {} is open", port);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Ports and port specification resolution
//! - [`scanner`] - Coordinator, worker pool dispatcher and the `Prober` trait
//! - [`config`] - Defaults and host-derived limits
//! - [`output`] - Plain and JSON formatters
//! - [`cli`] - Command-line front end
//! - [`error`] - Error types

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use error::{PortSpecError, ScanError};
pub use scanner::{run_scan, Coordinator, Prober, ScanConfig, ScanOutcome, ScanPhase};
pub use types::{resolve, Port, PortSpec};
