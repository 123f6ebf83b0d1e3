//! Backend timestamp parsing
//!
//! The backend mixes RFC 3339, `YYYY-MM-DD HH:MM:SS` and bare dates. Naive
//! values are store-local time (UTC+7).

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};

/// Store timezone offset from UTC, in hours
pub const STORE_UTC_OFFSET_HOURS: i32 = 7;

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Which end of a date-only value to pick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayBound {
    /// 00:00:00
    Start,
    /// 23:59:59
    End,
}

pub fn store_offset() -> FixedOffset {
    FixedOffset::east_opt(STORE_UTC_OFFSET_HOURS * 3600).unwrap_or_else(|| Utc.fix())
}

fn local_to_utc(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    store_offset()
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse any supported timestamp; date-only values resolve to `bound`.
pub fn parse_datetime_bound(raw: &str, bound: DayBound) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    // Fractional seconds without offset: "2024-05-01T10:00:00.000000"
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return local_to_utc(naive);
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return local_to_utc(naive);
        }
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let time = match bound {
        DayBound::Start => NaiveTime::MIN,
        DayBound::End => NaiveTime::from_hms_opt(23, 59, 59)?,
    };
    local_to_utc(date.and_time(time))
}

/// Parse a timestamp, treating date-only values as start of day
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    parse_datetime_bound(raw, DayBound::Start)
}

/// Parse an optional timestamp, logging values that do not parse
pub fn parse_opt_datetime(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    let parsed = parse_datetime(raw);
    if parsed.is_none() {
        tracing::warn!(value = %raw, "unparsable timestamp from backend");
    }
    parsed
}

/// Calendar date in store-local time
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_datetime(raw).map(|dt| dt.with_timezone(&store_offset()).date_naive()))
}

/// Format for outgoing payloads (`YYYY-MM-DD HH:MM:SS`, store-local)
pub fn format_store_datetime(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&store_offset())
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc3339() {
        let dt = parse_datetime("2024-05-01T10:00:00Z").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-05-01T10:00:00+00:00");
    }

    #[test]
    fn test_naive_is_store_local() {
        let dt = parse_datetime("2024-05-01 17:00:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-05-01T10:00:00+00:00");
    }

    #[test]
    fn test_date_only_bounds() {
        let start = parse_datetime_bound("2024-05-01", DayBound::Start).unwrap();
        let end = parse_datetime_bound("2024-05-01", DayBound::End).unwrap();
        assert_eq!(format_store_datetime(&start), "2024-05-01 00:00:00");
        assert_eq!(format_store_datetime(&end), "2024-05-01 23:59:59");
    }

    #[test]
    fn test_garbage() {
        assert!(parse_datetime("").is_none());
        assert!(parse_datetime("yesterday").is_none());
    }

    #[test]
    fn test_parse_date_from_datetime() {
        // 20:00 UTC is already the next day in the store
        let date = parse_date("2024-05-01T20:00:00Z").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
    }
}
