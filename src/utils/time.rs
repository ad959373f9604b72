//! Time utilities for listings instants, XMLTV timestamps and civil dates

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Zone used for every civil-date derived field in the guide
/// (`<date>` fallback and date-based `xmltv_ns` numbering).
pub const LISTINGS_TIMEZONE: Tz = chrono_tz::America::New_York;

/// Parse an ISO-8601-ish instant as served by the grid API.
///
/// Accepts RFC 3339, the grid's minute-precision form (`2024-05-20T04:00Z`),
/// offset forms without seconds, naive date-times (assumed UTC) and bare
/// dates (midnight UTC).
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    let offset_formats = ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z", "%Y-%m-%dT%H:%M:%S%z"];
    for format in &offset_formats {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    let naive = trimmed
        .strip_suffix('Z')
        .or_else(|| trimmed.strip_suffix('z'))
        .unwrap_or(trimmed);

    let naive_formats = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    for format in &naive_formats {
        if let Ok(naive_dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(naive_dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(naive, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive_dt| naive_dt.and_utc())
}

/// Parse an instant, falling back to the Unix epoch when it is unparseable
pub fn parse_instant_or_epoch(value: &str) -> DateTime<Utc> {
    parse_instant(value).unwrap_or(DateTime::UNIX_EPOCH)
}

/// Format an instant as an XMLTV timestamp (`YYYYMMDDhhmmss +0000`)
pub fn format_xmltv_timestamp(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%d%H%M%S +0000").to_string()
}

/// Format an instant as `YYYY-MM-DD HH:MM:SS` in UTC
pub fn format_air_date(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Calendar date observed in `zone` at `instant`
pub fn civil_date_in_zone(instant: DateTime<Utc>, zone: Tz) -> NaiveDate {
    instant.with_timezone(&zone).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};
    use rstest::rstest;

    #[rstest]
    #[case("2024-05-20T04:00:00Z", "2024-05-20T04:00:00+00:00")]
    #[case("2024-05-20T04:00Z", "2024-05-20T04:00:00+00:00")]
    #[case("2024-05-20T00:00-04:00", "2024-05-20T04:00:00+00:00")]
    #[case("2024-05-20T06:00:00+02:00", "2024-05-20T04:00:00+00:00")]
    #[case("2024-05-20T04:00:00.250Z", "2024-05-20T04:00:00.250+00:00")]
    #[case("2024-05-20T04:00:00", "2024-05-20T04:00:00+00:00")]
    #[case("2010-05-04", "2010-05-04T00:00:00+00:00")]
    #[case("  2010-05-04  ", "2010-05-04T00:00:00+00:00")]
    fn test_parse_instant(#[case] input: &str, #[case] expected: &str) {
        let parsed = parse_instant(input).expect("instant should parse");
        assert_eq!(parsed.to_rfc3339(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("tomorrow")]
    #[case("2024-13-40")]
    fn test_parse_instant_rejects_garbage(#[case] input: &str) {
        assert!(parse_instant(input).is_none());
    }

    #[test]
    fn test_parse_instant_or_epoch() {
        assert_eq!(parse_instant_or_epoch("garbage").timestamp(), 0);
        assert_eq!(
            parse_instant_or_epoch("1970-01-01T00:01Z").timestamp(),
            60
        );
    }

    #[test]
    fn test_format_xmltv_timestamp_is_always_utc() {
        let instant = DateTime::parse_from_rfc3339("2024-05-20T00:30:05-04:00")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_xmltv_timestamp(instant), "20240520043005 +0000");
    }

    #[test]
    fn test_format_air_date() {
        let instant = Utc.with_ymd_and_hms(2010, 5, 4, 0, 0, 0).unwrap();
        assert_eq!(format_air_date(instant), "2010-05-04 00:00:00");
    }

    #[rstest]
    // Evening in New York is already the next day in UTC
    #[case(Utc.with_ymd_and_hms(2024, 1, 1, 3, 0, 0).unwrap(), (2023, 12, 31))]
    #[case(Utc.with_ymd_and_hms(2024, 7, 4, 3, 30, 0).unwrap(), (2024, 7, 3))]
    #[case(Utc.with_ymd_and_hms(2024, 7, 4, 4, 0, 0).unwrap(), (2024, 7, 4))]
    // Around the spring-forward transition (EST -05:00 until 07:00 UTC)
    #[case(Utc.with_ymd_and_hms(2024, 3, 10, 4, 59, 0).unwrap(), (2024, 3, 9))]
    #[case(Utc.with_ymd_and_hms(2024, 3, 10, 5, 0, 0).unwrap(), (2024, 3, 10))]
    #[case(DateTime::UNIX_EPOCH, (1969, 12, 31))]
    fn test_civil_date_in_new_york(
        #[case] instant: DateTime<Utc>,
        #[case] expected: (i32, u32, u32),
    ) {
        let date = civil_date_in_zone(instant, LISTINGS_TIMEZONE);
        assert_eq!((date.year(), date.month(), date.day()), expected);
    }

    #[test]
    fn test_civil_date_in_other_zone() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 23, 30, 0).unwrap();
        let tokyo: Tz = "Asia/Tokyo".parse().unwrap();
        assert_eq!(
            civil_date_in_zone(instant, tokyo),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
    }
}
