//! Error types for portsweep.
//!
//! Uses `thiserror` for ergonomic error definitions.

use thiserror::Error;

/// Errors produced while resolving a port specification.
///
/// Each variant carries the offending token so the caller can report it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PortSpecError {
    #[error("invalid port: {0}")]
    InvalidPort(String),

    #[error("invalid range: {0}")]
    InvalidRange(String),

    #[error("port {0} is out of valid range (1-65535)")]
    OutOfRange(u32),
}

/// Reasons a single probe failed.
///
/// These never leave the prober; they exist so failures can be traced.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("connection timed out")]
    Timeout,

    #[error("connection refused")]
    Refused,

    #[error("unreachable: {0}")]
    Unreachable(String),

    #[error("port {0} cannot be addressed")]
    Unaddressable(u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that abort a scan run.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    PortSpec(#[from] PortSpecError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("work queue error: {0}")]
    Queue(String),

    #[error("worker task failed: {0}")]
    Worker(String),
}

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;
