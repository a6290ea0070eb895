//! Severities and the suppression bitmask
//!
//! Each severity owns one bit so a set of suppressed severities packs into a
//! single byte that can be read atomically on every log call.

use std::fmt;
use std::str::FromStr;

/// Log severity
///
/// The discriminants are part of the public contract and never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Severity {
    Debug = 0x01,
    Info = 0x02,
    Warning = 0x04,
    Error = 0x08,
}

impl Severity {
    /// All severities, lowest first
    pub const ALL: [Severity; 4] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
    ];

    /// Bit value used in the suppression mask
    pub fn bit(self) -> u8 {
        self as u8
    }

    /// Glyph placed in front of every line of this severity
    pub fn prefix(self) -> &'static str {
        match self {
            Severity::Debug => "🔍",
            Severity::Info => "💬",
            Severity::Warning => "⚠️",
            Severity::Error => "❌",
        }
    }

    /// Get the display name for this severity
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// Write `text` through the process-wide default logger
    pub fn write(self, text: impl AsRef<str>) {
        super::logger::global().write(self, text.as_ref());
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown severity name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity '{0}' (expected debug, info, warning or error)")]
pub struct ParseSeverityError(String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            other => Err(ParseSeverityError(other.to_string())),
        }
    }
}

/// Bitmask of suppressed severities
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuppressionMask(u8);

impl SuppressionMask {
    /// Mask with nothing suppressed
    pub const NONE: SuppressionMask = SuppressionMask(0);

    /// Build a mask from a set of severities
    pub fn from_severities(severities: &[Severity]) -> Self {
        Self(severities.iter().fold(0, |mask, s| mask | s.bit()))
    }

    /// Wrap a raw bit pattern, dropping bits no severity owns
    pub fn from_bits(bits: u8) -> Self {
        let known = Severity::ALL.iter().fold(0, |mask, s| mask | s.bit());
        Self(bits & known)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// Check whether `severity` is suppressed
    pub fn suppresses(self, severity: Severity) -> bool {
        self.0 & severity.bit() != 0
    }

    /// The suppressed severities, lowest first
    pub fn severities(self) -> Vec<Severity> {
        Severity::ALL
            .into_iter()
            .filter(|s| self.suppresses(*s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_are_disjoint_powers_of_two() {
        assert_eq!(Severity::Debug.bit(), 1);
        assert_eq!(Severity::Info.bit(), 2);
        assert_eq!(Severity::Warning.bit(), 4);
        assert_eq!(Severity::Error.bit(), 8);

        for a in Severity::ALL {
            for b in Severity::ALL {
                if a != b {
                    assert_eq!(a.bit() & b.bit(), 0);
                }
            }
        }
    }

    #[test]
    fn test_prefixes() {
        assert_eq!(Severity::Debug.prefix(), "🔍");
        assert_eq!(Severity::Info.prefix(), "💬");
        assert_eq!(Severity::Warning.prefix(), "⚠️");
        assert_eq!(Severity::Error.prefix(), "❌");
    }

    #[test]
    fn test_mask_from_severities() {
        let mask = SuppressionMask::from_severities(&[Severity::Debug, Severity::Error]);
        assert_eq!(mask.bits(), 0x09);
        assert!(mask.suppresses(Severity::Debug));
        assert!(!mask.suppresses(Severity::Info));
        assert!(!mask.suppresses(Severity::Warning));
        assert!(mask.suppresses(Severity::Error));
        assert_eq!(mask.severities(), vec![Severity::Debug, Severity::Error]);
    }

    #[test]
    fn test_mask_from_bits_drops_unknown() {
        assert_eq!(SuppressionMask::from_bits(0xF2).bits(), 0x02);
    }

    #[test]
    fn test_empty_mask_suppresses_nothing() {
        for s in Severity::ALL {
            assert!(!SuppressionMask::NONE.suppresses(s));
        }
        assert_eq!(SuppressionMask::default(), SuppressionMask::NONE);
    }

    #[test]
    fn test_parse_severity() {
        assert_eq!("debug".parse::<Severity>(), Ok(Severity::Debug));
        assert_eq!("INFO".parse::<Severity>(), Ok(Severity::Info));
        assert_eq!("warn".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!(" error ".parse::<Severity>(), Ok(Severity::Error));
        assert!("fatal".parse::<Severity>().is_err());
    }
}
