//! JSON output formatting.

use crate::scanner::ScanOutcome;
use std::io::{self, Write};

/// Write the outcome as pretty-printed JSON.
pub fn write_json<W: Write>(out: &mut W, outcome: &ScanOutcome) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, outcome).map_err(io::Error::other)?;
    writeln!(out)
}

/// Print results in JSON format.
pub fn print_json(outcome: &ScanOutcome) -> io::Result<()> {
    let stdout = io::stdout();
    write_json(&mut stdout.lock(), outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Port;

    #[test]
    fn test_json_fields() {
        let outcome = ScanOutcome::new("example.com", 3, vec![Port::new(443), Port::new(80)])
            .with_duration_ms(12);
        let mut buf = Vec::new();
        write_json(&mut buf, &outcome).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["host"], "example.com");
        assert_eq!(value["ports_scanned"], 3);
        assert_eq!(value["open_ports"], serde_json::json!([80, 443]));
        assert_eq!(value["count"], 2);
        assert_eq!(value["duration_ms"], 12);
    }
}
