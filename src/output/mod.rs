//! Output formatting module.
//!
//! Provides plain text and JSON formatters for scan outcomes.

mod json_format;
mod plain;

pub use json_format::{print_json, write_json};
pub use plain::{print_error, print_plain, print_scan_header, write_plain};

use crate::scanner::ScanOutcome;
use std::fmt;
use std::io;

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One line per open port and a summary
    #[default]
    Plain,
    /// JSON structured output
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// When to colour plain output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    /// Colour when stdout is a terminal
    #[default]
    Auto,
    /// Always emit colour escape sequences
    Always,
    /// Never emit colour escape sequences
    Never,
}

impl ColorChoice {
    /// Resolve the choice against the current stdout.
    pub fn enabled(self) -> bool {
        match self {
            Self::Auto => console::colors_enabled(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Format and print scan results according to the specified format.
pub fn print_results(outcome: &ScanOutcome, format: OutputFormat, color: ColorChoice) -> io::Result<()> {
    match format {
        OutputFormat::Plain => print_plain(outcome, color.enabled()),
        OutputFormat::Json => print_json(outcome),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_choice() {
        assert!(ColorChoice::Always.enabled());
        assert!(!ColorChoice::Never.enabled());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Plain.to_string(), "plain");
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
