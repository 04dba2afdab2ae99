//! Timestamp utilities

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Wire format for local timestamps, without offset
pub const WIRE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Emitted in place of an unparseable or absent timestamp
pub const DEFAULT_DATETIME: &str = "0001-01-01T00:00:00";

/// Parse an upstream instant
///
/// Accepts RFC 3339 (`2020-08-07T14:30:00Z`, `...+02:00`), compact offsets
/// (`2020-08-07T14:30:00+0000`) and naive timestamps, which are taken as UTC.
pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z") {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in [WIRE_DATETIME_FORMAT, "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    Err(Error::MalformedTimestamp(raw.to_string()))
}

/// Parse an IANA timezone name
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| Error::Config(format!("Invalid timezone '{}': {}", name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_instant("2020-08-07T14:30:00Z").unwrap();
        assert_eq!(dt.timestamp(), 1_596_810_600);
    }

    #[test]
    fn test_parse_offset_is_normalized_to_utc() {
        let dt = parse_instant("2020-08-07T16:30:00+02:00").unwrap();
        assert_eq!(dt, parse_instant("2020-08-07T14:30:00Z").unwrap());
    }

    #[test]
    fn test_parse_compact_offset() {
        let dt = parse_instant("2020-08-07T14:30:00+0000").unwrap();
        assert_eq!(dt.day(), 7);
    }

    #[test]
    fn test_parse_naive_as_utc() {
        let dt = parse_instant("2020-08-07T14:30:00").unwrap();
        assert_eq!(dt, parse_instant("2020-08-07T14:30:00Z").unwrap());
    }

    #[test]
    fn test_parse_garbage() {
        let err = parse_instant("yesterday afternoon").unwrap_err();
        assert!(matches!(err, Error::MalformedTimestamp(_)));
    }

    #[test]
    fn test_parse_timezone() {
        assert!(parse_timezone("America/Toronto").is_ok());
        assert!(matches!(parse_timezone("Mars/Olympus"), Err(Error::Config(_))));
    }
}
