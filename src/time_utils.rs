// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing and formatting.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse either an RFC3339 timestamp or a bare `YYYY-MM-DD` date.
///
/// Bare dates resolve to midnight UTC.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

/// Last representable instant of the UTC day containing `date`.
pub fn end_of_day(date: DateTime<Utc>) -> DateTime<Utc> {
    let last = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    date.date_naive().and_time(last).and_utc()
}

/// Serde adapter accepting RFC3339 or `YYYY-MM-DD`.
pub fn deserialize_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date {:?}", raw)))
}

/// Optional variant of [`deserialize_date`]; `null` reads as `None`.
pub fn deserialize_opt_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_date(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date {:?}", raw))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_date_accepts_both_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 4, 22, 0, 0, 0).unwrap();
        assert_eq!(parse_date("2024-04-22"), Some(expected));
        assert_eq!(parse_date("2024-04-22T00:00:00Z"), Some(expected));
        assert_eq!(parse_date("2024-04-22T02:00:00+02:00"), Some(expected));
        assert_eq!(parse_date("April 22nd"), None);
    }

    #[test]
    fn test_end_of_day() {
        let start = Utc.with_ymd_and_hms(2024, 4, 22, 8, 30, 0).unwrap();
        assert_eq!(format_utc_rfc3339(end_of_day(start)), "2024-04-22T23:59:59Z");
    }
}
