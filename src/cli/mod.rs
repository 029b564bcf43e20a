//! Command-line interface definitions for portsweep.
//!
//! Uses `clap` derive macros for declarative argument parsing. The CLI is a
//! thin layer: it turns flags into a `ScanConfig` and prints the outcome.

mod scan;

pub use scan::ScanCommand;

use clap::Parser;

/// portsweep - a concurrent TCP connect port scanner.
///
/// Probes every requested port on a host with a bounded pool of workers
/// and reports the ports that accepted a connection, in ascending order.
#[derive(Parser, Debug)]
#[command(name = "portsweep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A concurrent TCP connect port scanner", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub scan: ScanCommand,

    /// Enable debug logging and a progress bar on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Execute the parsed command line.
    pub async fn run(&self) -> anyhow::Result<()> {
        self.scan.execute(self.verbose).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{ColorChoice, OutputFormat};
    use clap::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["portsweep", "--host", "example.com"]).unwrap();
        assert_eq!(cli.scan.host, "example.com");
        assert_eq!(cli.scan.ports, "");
        assert_eq!(cli.scan.timeout, 500);
        assert_eq!(cli.scan.concurrency, None);
        assert!(!cli.scan.strict_ports);
        assert_eq!(cli.scan.output, OutputFormat::Plain);
        assert_eq!(cli.scan.color, ColorChoice::Auto);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "portsweep", "-H", "10.0.0.1", "-p", "22,80-90", "-t", "250", "-c", "16", "-v",
        ])
        .unwrap();
        assert_eq!(cli.scan.host, "10.0.0.1");
        assert_eq!(cli.scan.ports, "22,80-90");
        assert_eq!(cli.scan.timeout, 250);
        assert_eq!(cli.scan.concurrency, Some(16));
        assert!(cli.verbose);
    }

    #[test]
    fn test_missing_host_is_usage_error() {
        let err = Cli::try_parse_from(["portsweep"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_empty_host_is_usage_error() {
        let err = Cli::try_parse_from(["portsweep", "--host", ""]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = Cli::try_parse_from(["portsweep", "-H", "h", "-t", "0"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_json_output() {
        let cli =
            Cli::try_parse_from(["portsweep", "-H", "h", "-o", "json", "--color", "never"]).unwrap();
        assert_eq!(cli.scan.output, OutputFormat::Json);
        assert_eq!(cli.scan.color, ColorChoice::Never);
    }
}
