//! Plain text output formatting.
//!
//! One line per open port followed by a summary. Colour is decided by the
//! caller and passed in, so the same report renders identically in tests.

use crate::scanner::ScanOutcome;
use console::{style, Style};
use std::io::{self, Write};

/// Write the plain report for `outcome`.
pub fn write_plain<W: Write>(out: &mut W, outcome: &ScanOutcome, colors: bool) -> io::Result<()> {
    let open_style = Style::new().green().force_styling(colors);

    for port in outcome.open_ports() {
        writeln!(out, "{}", open_style.apply_to(format!("Port {port} is open")))?;
    }

    writeln!(out)?;
    writeln!(out, "Scan complete. {} open ports found.", outcome.count())
}

/// Print results in human-readable plain text format.
pub fn print_plain(outcome: &ScanOutcome, colors: bool) -> io::Result<()> {
    let stdout = io::stdout();
    write_plain(&mut stdout.lock(), outcome, colors)
}

/// Print a scan header before scanning begins.
///
/// Goes to stderr so stdout carries only the report.
pub fn print_scan_header(host: &str, ports: &str, timeout_ms: u64) {
    let ports = if ports.is_empty() { "1-65535" } else { ports };
    eprintln!(
        "{} {} v{}",
        style("Starting").cyan(),
        style("portsweep").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    eprintln!("{} Target: {}", style("•").dim(), style(host).white().bold());
    eprintln!("{} Ports: {}", style("•").dim(), style(ports).white().bold());
    eprintln!("{} Timeout: {}ms", style("•").dim(), timeout_ms);
    eprintln!();
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Port;

    fn render(outcome: &ScanOutcome, colors: bool) -> String {
        let mut buf = Vec::new();
        write_plain(&mut buf, outcome, colors).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_plain_report() {
        let outcome = ScanOutcome::new("localhost", 100, vec![Port::new(9000), Port::new(8000)]);
        assert_eq!(
            render(&outcome, false),
            "Port 8000 is open\nPort 9000 is open\n\nScan complete. 2 open ports found.\n"
        );
    }

    #[test]
    fn test_plain_report_without_open_ports() {
        let outcome = ScanOutcome::new("localhost", 100, Vec::new());
        assert_eq!(render(&outcome, false), "\nScan complete. 0 open ports found.\n");
    }

    #[test]
    fn test_colored_report() {
        let outcome = ScanOutcome::new("localhost", 1, vec![Port::new(22)]);
        let text = render(&outcome, true);
        assert!(text.starts_with("\u{1b}[32mPort 22 is open\u{1b}[0m\n"));
        assert!(text.ends_with("Scan complete. 1 open ports found.\n"));
    }
}
