//! Time source and message control identifiers.
//!
//! Timestamps are rendered as `yyyyMMddHHmmss` in local wall time. The control
//! identifier is a fixed facility prefix followed by such a timestamp, so two
//! messages built within the same second share an identifier.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use chrono::{Duration, Local, NaiveDateTime};

/// `chrono` format string for HL7 `TS` values at second precision.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Facility prefix of every message control identifier.
pub const FACILITY_PREFIX: &str = "1234";

/// Source of the current time.
pub trait Clock: fmt::Debug + Send + Sync {
    /// Returns the current local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock time in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to. Used by tests and demos.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    /// Creates a clock stopped at `now`.
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Formats a timestamp as `yyyyMMddHHmmss`.
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Builds a message control identifier from the facility prefix and a timestamp.
pub fn control_id(at: NaiveDateTime) -> String {
    format!("{}{}", FACILITY_PREFIX, format_timestamp(at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_milli_opt(12, 5, 7, 250))
            .unwrap()
    }

    #[test]
    fn test_format_timestamp_truncates_to_seconds() {
        assert_eq!(format_timestamp(noon()), "20240309120507");
    }

    #[test]
    fn test_control_id_prefix() {
        assert_eq!(control_id(noon()), "123420240309120507");
    }

    #[test]
    fn test_fixed_clock_advance() {
        let clock = FixedClock::new(noon());
        clock.advance(Duration::seconds(1));
        assert_eq!(format_timestamp(clock.now()), "20240309120508");
    }
}
