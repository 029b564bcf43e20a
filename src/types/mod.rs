//! Core type definitions.
//!
//! `Port` and `PortSpec` describe what a scan probes; resolution turns a
//! user string into the concrete port list.

mod port;

pub use port::{resolve, resolve_strict, Port, PortRange, PortSpec};
