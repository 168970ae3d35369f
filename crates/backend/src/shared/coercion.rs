//! Lenient coercion of backend values
//!
//! Rows coming from the remote sheets are loosely typed: amounts arrive as
//! numbers, formatted strings or nothing at all, timestamps in whatever format
//! the person entering them used. Both helpers here never fail; they fall back
//! to `0` and to the current month respectively.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde_json::Value;

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Coerce a JSON value to an amount, `0.0` when it is not numeric
pub fn coerce_amount(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Value::String(s) => parse_amount(s).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Parse "1,250,000" / " 99.5 " style strings
fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a timestamp the way a browser `Date` would accept it
///
/// Offsets (RFC 3339) are converted to local time; naive values are taken as
/// local already.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// "YYYY-MM" of a date
pub fn month_of(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Month bucket of an order timestamp
///
/// Missing or unparseable timestamps land in the month of `today` instead of
/// being dropped.
pub fn month_key(timestamp: Option<&str>, today: NaiveDate) -> String {
    timestamp
        .and_then(parse_timestamp)
        .map(|dt| month_of(dt.date()))
        .unwrap_or_else(|| month_of(today))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 18).unwrap()
    }

    #[test]
    fn test_coerce_amount() {
        assert_eq!(coerce_amount(&json!(120)), 120.0);
        assert_eq!(coerce_amount(&json!(99.5)), 99.5);
        assert_eq!(coerce_amount(&json!("1,250,000")), 1_250_000.0);
        assert_eq!(coerce_amount(&json!(" 42 ")), 42.0);
        assert_eq!(coerce_amount(&json!("-15.25")), -15.25);
        assert_eq!(coerce_amount(&json!("")), 0.0);
        assert_eq!(coerce_amount(&json!("abc")), 0.0);
        assert_eq!(coerce_amount(&json!("NaN")), 0.0);
        assert_eq!(coerce_amount(&json!(null)), 0.0);
        assert_eq!(coerce_amount(&json!(true)), 0.0);
        assert_eq!(coerce_amount(&json!([1, 2])), 0.0);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        for raw in [
            "2024-01-15",
            "2024/01/15",
            "01/15/2024",
            "2024-01-15 10:30:00",
            "2024-01-15T10:30:00",
            "2024-01-15T10:30:00.123",
            "2024-01-15 10:30",
            "01/15/2024 10:30:00",
        ] {
            let parsed = parse_timestamp(raw).unwrap_or_else(|| panic!("failed on {raw}"));
            assert_eq!(parsed.date(), expected, "format {raw}");
        }
    }

    #[test]
    fn test_parse_timestamp_rfc3339_mid_month() {
        // mid-month so the local offset cannot move it across a month boundary
        let parsed = parse_timestamp("2024-06-15T12:00:00Z").unwrap();
        assert_eq!(month_of(parsed.date()), "2024-06");
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("   ").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2024-13-45").is_none());
    }

    #[test]
    fn test_month_key_falls_back_to_today() {
        assert_eq!(month_key(Some("2024-02-01"), today()), "2024-02");
        assert_eq!(month_key(Some("not a date"), today()), "2025-03");
        assert_eq!(month_key(Some(""), today()), "2025-03");
        assert_eq!(month_key(None, today()), "2025-03");
    }
}
