//! Scan command implementation.
//!
//! Turns parsed flags into a `ScanConfig`, runs the coordinator and prints
//! the outcome.

use crate::config::DEFAULT_TIMEOUT_MS;
use crate::error::ScanError;
use crate::output::{self, ColorChoice, OutputFormat};
use crate::scanner::{run_scan, ScanConfig};
use anyhow::Context;
use clap::builder::NonEmptyStringValueParser;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Scan a host for open TCP ports.
#[derive(Args, Debug)]
pub struct ScanCommand {
    /// Target host to scan (hostname or IP address)
    #[arg(
        short = 'H',
        long,
        env = "PORTSWEEP_HOST",
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub host: String,

    /// Ports to scan (e.g. "80,443" or "20-100"). Defaults to all ports.
    #[arg(
        short,
        long,
        env = "PORTSWEEP_PORTS",
        default_value = "",
        hide_default_value = true
    )]
    pub ports: String,

    /// Timeout in milliseconds for each port probe
    #[arg(
        short,
        long,
        env = "PORTSWEEP_TIMEOUT",
        default_value_t = DEFAULT_TIMEOUT_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Maximum concurrent probes (defaults to 20 per available CPU)
    #[arg(short = 'c', long)]
    pub concurrency: Option<usize>,

    /// Reject ports outside 1-65535 instead of probing them
    #[arg(long)]
    pub strict_ports: bool,

    /// Output format for results
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain)]
    pub output: OutputFormat,

    /// When to colour plain output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,
}

impl ScanCommand {
    /// Execute the scan command.
    pub async fn execute(&self, verbose: bool) -> anyhow::Result<()> {
        let config = self.scan_config(verbose);

        if verbose {
            output::print_scan_header(&self.host, &self.ports, self.timeout);
        }

        let outcome = run_scan(config).await.map_err(|e| match e {
            ScanError::PortSpec(_) => anyhow::Error::new(e).context("error parsing ports"),
            other => anyhow::Error::new(other).context(format!("scan of {} failed", self.host)),
        })?;

        output::print_results(&outcome, self.output, self.color)
            .context("failed to write results")?;

        Ok(())
    }

    /// Build the scan configuration described by these flags.
    pub fn scan_config(&self, verbose: bool) -> ScanConfig {
        let mut config = ScanConfig::new(&self.host, &self.ports)
            .with_timeout(Duration::from_millis(self.timeout));

        if let Some(concurrency) = self.concurrency {
            config = config.with_max_workers(concurrency);
        }
        if self.strict_ports {
            config = config.with_strict_ports();
        }
        if verbose {
            config = config.with_progress(progress_bar());
        }

        config
    }
}

fn progress_bar() -> ProgressBar {
    let style = ProgressStyle::default_bar()
        .template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        )
        .map(|s| s.progress_chars("=>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());

    let pb = ProgressBar::new(0);
    pb.set_style(style);
    pb
}
