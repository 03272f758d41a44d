//! Lenient timestamp handling for status records.
//!
//! Status timestamps come straight from port telemetry and are not always
//! well formed. Anything we cannot read is treated as "unknown" rather than
//! an error, so one bad port never hides the status of its station.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Offset layouts accepted after RFC 3339 fails, e.g. `+0000` without a colon.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Naive layouts accepted after the offset layouts. Interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Output layout for status timestamps.
const STATUS_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parse a status timestamp, returning `None` if it is empty or unreadable.
pub fn parse_status_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Format a status timestamp as `YYYY-MM-DDTHH:MM:SSZ`.
pub fn format_status_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(STATUS_FORMAT).to_string()
}

/// Format the per-run load watermark (ISO 8601, microseconds, `+00:00`).
pub fn format_load_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, false)
}
