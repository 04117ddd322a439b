//! Time source and timestamp text format.
//!
//! Timestamps are written as RFC 3339 in UTC with microsecond precision.
//! Reading also accepts naive ISO-8601 (`2024-03-01T09:30:00.123456`), taken
//! as UTC, so tables written by older tools keep loading.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

use crate::error::{LibrisError, Result};

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Format a timestamp for storage.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| LibrisError::InvalidInput(format!("Invalid timestamp {:?}: {}", value, e)))
}

/// Parse an optional stored timestamp; the empty string means "not set".
pub fn parse_optional_timestamp(value: &str) -> Result<Option<DateTime<Utc>>> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_timestamp(value).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_is_rfc3339_micros() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "2024-03-01T09:30:00.000000Z");
    }

    #[test]
    fn test_round_trip() {
        let ts = Utc::now();
        let parsed = parse_timestamp(&format_timestamp(&ts)).unwrap();
        assert_eq!(parsed.timestamp_micros(), ts.timestamp_micros());
    }

    #[test]
    fn test_parse_naive_iso() {
        let parsed = parse_timestamp("2024-03-01T09:30:00.123456").unwrap();
        assert_eq!(parsed.timestamp_subsec_micros(), 123456);
        assert!(parse_timestamp("2024-03-01T09:30:00").is_ok());
    }

    #[test]
    fn test_parse_offset_converts_to_utc() {
        let parsed = parse_timestamp("2024-03-01T10:30:00+01:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_optional_empty_is_none() {
        assert_eq!(parse_optional_timestamp("").unwrap(), None);
        assert!(parse_optional_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_fixed_clock() {
        let ts = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(FixedClock(ts).now(), ts);
    }
}
