//! Timestamp display helpers
//!
//! Timestamps arrive as strings. Parseable ones are rendered in the
//! `2024/6/15 16:30:00` style; anything else is shown as sent.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone};

const DISPLAY_FORMAT: &str = "%Y/%-m/%-d %H:%M:%S";

/// Format a timestamp in the server's current local offset
pub fn format_timestamp(raw: &str) -> String {
    format_timestamp_in(raw, Local::now().offset())
}

/// Format a timestamp in an explicit offset
pub fn format_timestamp_in(raw: &str, offset: &FixedOffset) -> String {
    match parse_timestamp(raw) {
        Some(Parsed::Zoned(dt)) => dt.with_timezone(offset).format(DISPLAY_FORMAT).to_string(),
        Some(Parsed::Naive(naive)) => offset
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.format(DISPLAY_FORMAT).to_string())
            .unwrap_or_else(|| raw.to_string()),
        None => raw.to_string(),
    }
}

enum Parsed {
    Zoned(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

fn parse_timestamp(raw: &str) -> Option<Parsed> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(Parsed::Zoned(dt));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(Parsed::Naive)
}
