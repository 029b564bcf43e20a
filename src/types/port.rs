//! Port types and port specification resolution.
//!
//! A `PortSpec` is the parsed form of a user string such as `"22,80,8000-8010"`.
//! Resolving it yields the ordered list of ports to probe.

use crate::error::PortSpecError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// A port number as supplied by the user.
///
/// Explicit input is not bounds-checked during resolution, so a `Port` may
/// hold a value outside 1-65535. Such a port can never be connected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Port(u32);

impl Port {
    /// Minimum valid port number.
    pub const MIN: u32 = 1;
    /// Maximum valid port number.
    pub const MAX: u32 = 65535;

    #[inline]
    pub const fn new(port: u32) -> Self {
        Self(port)
    }

    /// Get the raw port number.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Check whether the port lies in 1-65535.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 >= Self::MIN && self.0 <= Self::MAX
    }

    /// The port as a socket port number, if it is valid.
    pub fn as_u16(self) -> Option<u16> {
        if self.is_valid() {
            u16::try_from(self.0).ok()
        } else {
            None
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for Port {
    fn from(port: u16) -> Self {
        Self(u32::from(port))
    }
}

/// An inclusive range of ports. A single port is a range of length one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRange {
    start: Port,
    end: Port,
}

impl PortRange {
    /// Create a new port range, rejecting `start > end`.
    pub fn new(start: Port, end: Port) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Create a range containing a single port.
    pub const fn single(port: Port) -> Self {
        Self {
            start: port,
            end: port,
        }
    }

    /// Get the number of ports in this range.
    const fn len(&self) -> usize {
        (self.end.0 - self.start.0) as usize + 1
    }

    /// Iterate over all ports in this range, ascending.
    pub fn iter(&self) -> impl Iterator<Item = Port> {
        (self.start.0..=self.end.0).map(Port)
    }

    /// The first port in this range lying outside 1-65535, if any.
    fn first_out_of_range(&self) -> Option<Port> {
        if !self.start.is_valid() {
            Some(self.start)
        } else if !self.end.is_valid() {
            Some(self.end)
        } else {
            None
        }
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// A parsed port specification.
///
/// Supports formats like:
/// - Empty: every port from 1 to 65535
/// - Single port: "80"
/// - Comma-separated: "80,443,8080"
/// - Range: "1-1000"
/// - Mixed: "22,80,443,8000-9000"
///
/// Tokens keep their input order. Overlapping tokens are not merged, so a
/// port named twice is resolved twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortSpec {
    ranges: Vec<PortRange>,
}

impl PortSpec {
    /// Number of ports in 1-65535.
    pub const FULL_RANGE_LEN: usize = Port::MAX as usize;

    /// Full port range (1-65535).
    pub fn full() -> Self {
        Self {
            ranges: vec![PortRange {
                start: Port(Port::MIN),
                end: Port(Port::MAX),
            }],
        }
    }

    /// Total number of ports the specification resolves to, duplicates included.
    pub fn count(&self) -> usize {
        self.ranges.iter().map(PortRange::len).sum()
    }

    /// Expand into the ordered port list, token by token.
    ///
    /// The list grows as it is built; an oversized specification is logged
    /// rather than reserved up front.
    pub fn to_ports(&self) -> Vec<Port> {
        let count = self.count();
        if count > Self::FULL_RANGE_LEN {
            warn!(count, "port specification expands beyond the full port range");
        }
        self.ranges.iter().flat_map(|range| range.iter()).collect()
    }

    /// Reject any port outside 1-65535.
    pub fn check_bounds(&self) -> Result<(), PortSpecError> {
        match self.ranges.iter().find_map(PortRange::first_out_of_range) {
            Some(port) => Err(PortSpecError::OutOfRange(port.value())),
            None => Ok(()),
        }
    }

    fn parse_token(token: &str) -> Result<PortRange, PortSpecError> {
        if token.contains('-') {
            let invalid = || PortSpecError::InvalidRange(token.to_string());
            let bounds: Vec<&str> = token.split('-').collect();
            let [start, end] = bounds.as_slice() else {
                return Err(invalid());
            };
            let start: u32 = start.parse().map_err(|_| invalid())?;
            let end: u32 = end.parse().map_err(|_| invalid())?;
            PortRange::new(Port(start), Port(end)).ok_or_else(invalid)
        } else {
            let port: u32 = token
                .parse()
                .map_err(|_| PortSpecError::InvalidPort(token.to_string()))?;
            Ok(PortRange::single(Port(port)))
        }
    }
}

impl FromStr for PortSpec {
    type Err = PortSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::full());
        }

        let ranges = s
            .split(',')
            .map(Self::parse_token)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { ranges })
    }
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.ranges.iter().map(|r| r.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

/// Resolve a port specification string into the ordered list of ports to probe.
///
/// The first malformed token aborts resolution. Explicit ports outside
/// 1-65535 pass through unchanged; they are logged because no probe
/// against them can succeed.
pub fn resolve(spec: &str) -> Result<Vec<Port>, PortSpecError> {
    let parsed: PortSpec = spec.parse()?;
    if let Err(PortSpecError::OutOfRange(port)) = parsed.check_bounds() {
        warn!(port, "port outside 1-65535 will be probed but can never be open");
    }
    Ok(parsed.to_ports())
}

/// Like [`resolve`], but rejects ports outside 1-65535.
pub fn resolve_strict(spec: &str) -> Result<Vec<Port>, PortSpecError> {
    let parsed: PortSpec = spec.parse()?;
    parsed.check_bounds()?;
    Ok(parsed.to_ports())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    fn ports(values: &[u32]) -> Vec<Port> {
        values.iter().copied().map(Port::new).collect()
    }

    #[test]
    fn test_empty_spec_is_full_range() {
        let resolved = assert_ok!(resolve(""));
        assert_eq!(resolved.len(), 65535);
        assert_eq!(resolved.first(), Some(&Port::new(1)));
        assert_eq!(resolved.last(), Some(&Port::new(65535)));
        assert!(resolved.windows(2).all(|w| w[0].value() + 1 == w[1].value()));
    }

    #[test]
    fn test_comma_separated() {
        assert_eq!(resolve("80,443").unwrap(), ports(&[80, 443]));
    }

    #[test]
    fn test_range_is_inclusive() {
        assert_eq!(resolve("20-22").unwrap(), ports(&[20, 21, 22]));
    }

    #[test]
    fn test_mixed_keeps_token_order() {
        assert_eq!(resolve("20-22,80").unwrap(), ports(&[20, 21, 22, 80]));
        assert_eq!(resolve("443,20-21").unwrap(), ports(&[443, 20, 21]));
    }

    #[test]
    fn test_duplicates_are_kept() {
        assert_eq!(resolve("80,79-81").unwrap(), ports(&[80, 79, 80, 81]));
    }

    #[test]
    fn test_single_port_range() {
        assert_eq!(resolve("8080-8080").unwrap(), ports(&[8080]));
    }

    #[test]
    fn test_invalid_port() {
        assert_eq!(
            resolve("abc"),
            Err(PortSpecError::InvalidPort("abc".to_string()))
        );
    }

    #[test]
    fn test_reversed_range() {
        assert_eq!(
            resolve("50-20"),
            Err(PortSpecError::InvalidRange("50-20".to_string()))
        );
    }

    #[test]
    fn test_range_arity() {
        assert_eq!(
            resolve("1-2-3"),
            Err(PortSpecError::InvalidRange("1-2-3".to_string()))
        );
    }

    #[test]
    fn test_range_with_bad_bound() {
        assert!(matches!(resolve("1-x"), Err(PortSpecError::InvalidRange(_))));
        assert!(matches!(resolve("-5"), Err(PortSpecError::InvalidRange(_))));
    }

    #[test]
    fn test_first_bad_token_aborts() {
        assert_eq!(
            resolve("80,abc,90-10"),
            Err(PortSpecError::InvalidPort("abc".to_string()))
        );
        assert_err!(resolve("80,"));
    }

    #[test]
    fn test_tokens_are_not_trimmed() {
        assert_err!(resolve("80, 443"));
    }

    #[test]
    fn test_out_of_range_passes_through() {
        assert_eq!(resolve("0,70000").unwrap(), ports(&[0, 70000]));
    }

    #[test]
    fn test_strict_rejects_out_of_range() {
        assert_eq!(resolve_strict("80,70000"), Err(PortSpecError::OutOfRange(70000)));
        assert_eq!(resolve_strict("0-2"), Err(PortSpecError::OutOfRange(0)));
        assert_eq!(resolve_strict("1-3").unwrap(), ports(&[1, 2, 3]));
    }

    #[test]
    fn test_port_validity() {
        assert!(!Port::new(0).is_valid());
        assert!(Port::new(1).is_valid());
        assert!(Port::new(65535).is_valid());
        assert_eq!(Port::new(65536).as_u16(), None);
        assert_eq!(Port::new(443).as_u16(), Some(443));
    }

    #[test]
    fn test_spec_display_and_count() {
        let spec: PortSpec = "22,80-82".parse().unwrap();
        assert_eq!(spec.to_string(), "22,80-82");
        assert_eq!(spec.count(), 4);
        assert_eq!(PortSpec::full().count(), 65535);
    }

    #[test]
    fn test_oversized_spec_is_counted_without_expanding() {
        let spec: PortSpec = "1-4294967295".parse().unwrap();
        assert_eq!(spec.count(), 4_294_967_295);
        assert!(spec.count() > PortSpec::FULL_RANGE_LEN);
    }

    #[test]
    fn test_overlapping_spec_expands_in_order() {
        let spec: PortSpec = "3-4,1-65535".parse().unwrap();
        let ports = spec.to_ports();
        assert_eq!(ports.len(), 65537);
        assert_eq!(&ports[..3], &[Port::new(3), Port::new(4), Port::new(1)]);
    }
}
