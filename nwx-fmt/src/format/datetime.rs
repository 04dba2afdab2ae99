//! Timezone-relative wire timestamps

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use nwx_common::time::{parse_instant, DEFAULT_DATETIME, WIRE_DATETIME_FORMAT};
use nwx_common::{Degradation, Resolved};
use tracing::warn;

/// Render a UTC instant as local time in `tz`
///
/// `YYYY-MM-DDTHH:MM:SS`, with a `±HH:MM` suffix when `with_offset` is set.
/// The offset is the one in effect in `tz` at that instant.
pub fn format_relative(instant: DateTime<Utc>, tz: Tz, with_offset: bool) -> String {
    let local = instant.with_timezone(&tz);
    if with_offset {
        local.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
    } else {
        local.format(WIRE_DATETIME_FORMAT).to_string()
    }
}

/// Format an optional upstream timestamp for wire field `field`
///
/// Absent input yields the default silently; unparseable input yields the
/// default as a [`Degradation::MalformedTimestamp`].
pub fn format_timestamp_field(
    raw: Option<&str>,
    tz: Tz,
    with_offset: bool,
    field: &str,
) -> Resolved<String> {
    let raw = match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => raw,
        None => return Resolved::Ok(DEFAULT_DATETIME.to_string()),
    };
    match parse_instant(raw) {
        Ok(instant) => Resolved::Ok(format_relative(instant, tz, with_offset)),
        Err(_) => {
            warn!("{}: malformed timestamp '{}', using default", field, raw);
            Resolved::Degraded(
                DEFAULT_DATETIME.to_string(),
                Degradation::MalformedTimestamp {
                    field: field.to_string(),
                    raw: raw.to_string(),
                },
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nwx_common::time::parse_instant;

    fn toronto() -> Tz {
        "America/Toronto".parse().unwrap()
    }

    #[test]
    fn test_summer_offset() {
        let instant = parse_instant("2020-08-07T14:30:00Z").unwrap();
        assert_eq!(format_relative(instant, toronto(), false), "2020-08-07T10:30:00");
        assert_eq!(
            format_relative(instant, toronto(), true),
            "2020-08-07T10:30:00-04:00"
        );
    }

    #[test]
    fn test_winter_offset() {
        let instant = parse_instant("2020-01-15T14:30:00Z").unwrap();
        assert_eq!(
            format_relative(instant, toronto(), true),
            "2020-01-15T09:30:00-05:00"
        );
    }

    #[test]
    fn test_dst_transition_day() {
        // DST began 2020-03-08 at 02:00 local (07:00 UTC)
        let before = parse_instant("2020-03-08T06:59:00Z").unwrap();
        let after = parse_instant("2020-03-08T07:00:00Z").unwrap();
        assert_eq!(
            format_relative(before, toronto(), true),
            "2020-03-08T01:59:00-05:00"
        );
        assert_eq!(
            format_relative(after, toronto(), true),
            "2020-03-08T03:00:00-04:00"
        );
    }

    #[test]
    fn test_positive_offset() {
        let instant = parse_instant("2020-08-07T14:30:00Z").unwrap();
        let kolkata: Tz = "Asia/Kolkata".parse().unwrap();
        assert_eq!(
            format_relative(instant, kolkata, true),
            "2020-08-07T20:00:00+05:30"
        );
    }

    #[test]
    fn test_field_absent_is_default_without_degradation() {
        let result = format_timestamp_field(None, toronto(), true, "EmbargoTime");
        assert_eq!(result, Resolved::Ok(DEFAULT_DATETIME.to_string()));
    }

    #[test]
    fn test_field_malformed_is_degraded() {
        let result = format_timestamp_field(Some("not a date"), toronto(), false, "CreatedDateTime");
        assert!(result.is_degraded());
        assert_eq!(result.value(), DEFAULT_DATETIME);
        assert_eq!(
            result.degradation(),
            Some(&Degradation::MalformedTimestamp {
                field: "CreatedDateTime".into(),
                raw: "not a date".into()
            })
        );
    }
}
