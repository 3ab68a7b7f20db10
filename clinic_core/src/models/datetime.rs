//! ISO-8601 date-time handling shared by payloads, documents and responses.
//!
//! Values are kept as naive UTC, which is what the document store hands back.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use serde::Serializer;

const SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const MICROS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

// Larger magnitudes are read as milliseconds.
const MAX_SECONDS_TIMESTAMP: f64 = 2e10;

pub fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.naive_utc());
    }

    let normalized = match raw.as_bytes().get(10) {
        Some(b' ') => format!("{}T{}", &raw[..10], &raw[11..]),
        _ => raw.to_string(),
    };

    if let Ok(naive) = normalized.parse::<NaiveDateTime>() {
        return Some(naive);
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M") {
        return Some(naive);
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

pub fn from_timestamp(value: f64) -> Option<NaiveDateTime> {
    if !value.is_finite() {
        return None;
    }

    let millis = if value.abs() > MAX_SECONDS_TIMESTAMP {
        value
    } else {
        value * 1000.0
    };

    DateTime::from_timestamp_millis(millis.round() as i64).map(|dt| dt.naive_utc())
}

pub fn format_date_time(value: &NaiveDateTime) -> String {
    if value.nanosecond() == 0 {
        value.format(SECONDS_FORMAT).to_string()
    } else {
        value.format(MICROS_FORMAT).to_string()
    }
}

pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_date_time(value))
}
