//! Configuration for portsweep.
//!
//! There is no configuration file: values come from the command line, its
//! environment fallbacks, and the defaults defined here.

mod settings;

pub use settings::{available_parallelism, Settings, DEFAULT_TIMEOUT_MS, WORKERS_PER_CORE};
