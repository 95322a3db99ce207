//! Pipe-delimited (ER7) encoding.
//!
//! One line per segment. Fields are separated by MSH-1, components and
//! sub-components by the characters declared in MSH-2:
//!
//! ```text
//! MSH|^~\&|Sistema di partenza|Infrastruttura di partenza|...
//! PID||378785433211|||Gaetano^Cassalia||||||Via Mazzini 93^^Reggio Calabria^Calabria^^IT
//! ```
//!
//! Interior empty positions are written as zero-length values so every value
//! stays at its grammar position. Trailing empty positions are dropped.

pub mod de;
pub mod escape;
pub mod ser;

use std::fmt;
use std::str::FromStr;

pub use de::{from_pipe_slice, from_pipe_str};
pub use ser::{to_pipe_string, to_pipe_vec, to_pipe_writer};

/// What ends each encoded segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SegmentTerminator {
    /// Carriage return, the HL7 standard.
    #[default]
    Cr,
    /// Line feed.
    Lf,
    /// Carriage return followed by line feed.
    CrLf,
}

impl SegmentTerminator {
    /// Returns the terminator bytes as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentTerminator::Cr => "\r",
            SegmentTerminator::Lf => "\n",
            SegmentTerminator::CrLf => "\r\n",
        }
    }
}

impl fmt::Display for SegmentTerminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SegmentTerminator::Cr => "cr",
            SegmentTerminator::Lf => "lf",
            SegmentTerminator::CrLf => "crlf",
        };
        f.write_str(name)
    }
}

impl FromStr for SegmentTerminator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cr" => Ok(SegmentTerminator::Cr),
            "lf" => Ok(SegmentTerminator::Lf),
            "crlf" => Ok(SegmentTerminator::CrLf),
            other => Err(format!(
                "unknown segment terminator '{}', expected cr, lf or crlf",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminator_from_str() {
        assert_eq!("CR".parse::<SegmentTerminator>(), Ok(SegmentTerminator::Cr));
        assert_eq!("lf".parse::<SegmentTerminator>(), Ok(SegmentTerminator::Lf));
        assert_eq!("crlf".parse::<SegmentTerminator>(), Ok(SegmentTerminator::CrLf));
        assert!("nl".parse::<SegmentTerminator>().is_err());
    }

    #[test]
    fn test_terminator_display_round_trip() {
        for terminator in [SegmentTerminator::Cr, SegmentTerminator::Lf, SegmentTerminator::CrLf] {
            assert_eq!(terminator.to_string().parse(), Ok(terminator));
        }
    }

    #[test]
    fn test_default_is_carriage_return() {
        assert_eq!(SegmentTerminator::default().as_str(), "\r");
    }
}
