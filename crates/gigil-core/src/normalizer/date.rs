//! Display dates.
//!
//! Timestamps are rendered as `Feb 8, 2020` in UTC. A value that cannot be
//! parsed is treated as absent, so the caller's fallback chain moves on to the
//! next candidate instead of rendering a broken date.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// `MMM d, yyyy`
pub const DISPLAY_FORMAT: &str = "%b %-d, %Y";

/// Parse the timestamp shapes the CMS is known to emit.
///
/// Accepts RFC 3339 (`2020-02-08T10:00:00.000Z`, with any offset), the same
/// without seconds (`2020-02-08T10:00Z`, `2020-02-08T10:00+02:00`), a naive
/// date-time (`2020-02-08T10:00:00`, `2020-02-08 10:00:00`, `2020-02-08T10:00`,
/// read as UTC), and a bare date (`2020-02-08`, midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M%#z") {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%MZ",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn format_display(ts: DateTime<Utc>) -> String {
    ts.format(DISPLAY_FORMAT).to_string()
}
