//! Time-zone derived formatting.
//!
//! Pure functions of a zone identifier and an instant; unknown identifiers
//! yield `None`.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Offset, Utc};
use chrono_tz::Tz;

/// Parses an IANA time-zone identifier.
#[must_use]
pub fn parse_zone(zone_id: &str) -> Option<Tz> {
    zone_id.trim().parse().ok()
}

/// Seconds east of UTC for `zone` at `instant`.
#[must_use]
pub fn offset_seconds(zone: Tz, instant: DateTime<Utc>) -> i32 {
    instant.with_timezone(&zone).offset().fix().local_minus_utc()
}

/// Local wall time in `zone_id` at `instant`, rendered with a chrono
/// strftime `format`. Returns `None` for unknown zones or bad formats.
#[must_use]
pub fn time_string(zone_id: &str, instant: DateTime<Utc>, format: &str) -> Option<String> {
    let zone = parse_zone(zone_id)?;
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return None;
    }
    Some(instant.with_timezone(&zone).format(format).to_string())
}

/// Offset of `zone_id` at `instant` as `GMT+HH:MM`.
#[must_use]
pub fn gmt_offset_string(zone_id: &str, instant: DateTime<Utc>) -> Option<String> {
    let zone = parse_zone(zone_id)?;
    Some(format_gmt_offset(offset_seconds(zone, instant)))
}

/// How far `zone_id` is from `reference` at `instant`, e.g. `9h ahead`,
/// `5h 30m behind` or `Same time`.
#[must_use]
pub fn local_delta_string(zone_id: &str, instant: DateTime<Utc>, reference: Tz) -> Option<String> {
    let zone = parse_zone(zone_id)?;
    let delta = offset_seconds(zone, instant) - offset_seconds(reference, instant);
    Some(format_delta(delta))
}

fn format_gmt_offset(seconds: i32) -> String {
    let sign = if seconds < 0 { '-' } else { '+' };
    let abs = seconds.unsigned_abs();
    format!("GMT{sign}{:02}:{:02}", abs / 3600, (abs % 3600) / 60)
}

fn format_delta(seconds: i32) -> String {
    if seconds == 0 {
        return "Same time".to_string();
    }

    let abs = seconds.unsigned_abs();
    let span = match (abs / 3600, (abs % 3600) / 60) {
        (h, 0) => format!("{h}h"),
        (0, m) => format!("{m}m"),
        (h, m) => format!("{h}h {m}m"),
    };
    let direction = if seconds > 0 { "ahead" } else { "behind" };
    format!("{span} {direction}")
}
