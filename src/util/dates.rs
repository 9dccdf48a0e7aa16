use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};

/// The text shown when a schedule field is absent or unparsable.
const DATE_UNAVAILABLE: &str = "Date unavailable";

/// Formats a schedule field as a date for display.
///
/// Accepts the timestamp shapes the backend emits (RFC 3339, bare datetime,
/// bare date). Absent or unparsable input renders as "Date unavailable"
/// rather than failing the surrounding view.
pub fn format_date(raw: Option<&str>) -> String {
    match parse(raw) {
        Some(dt) => dt.format("%B %-d, %Y").to_string(),
        None => DATE_UNAVAILABLE.to_string(),
    }
}

/// Formats a schedule field as a date and time for display.
pub fn format_date_time(raw: Option<&str>) -> String {
    match parse(raw) {
        Some(dt) => dt.format("%B %-d, %Y %H:%M").to_string(),
        None => DATE_UNAVAILABLE.to_string(),
    }
}

/// Whether an event's schedule lies in the past. Unparsable input is treated
/// as not-past so the event stays visible.
pub fn is_event_in_past(raw: Option<&str>) -> bool {
    match parse(raw) {
        Some(dt) => dt < Local::now().naive_local(),
        None => false,
    }
}

fn parse(raw: Option<&str>) -> Option<NaiveDateTime> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = raw.parse::<DateTime<Utc>>() {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    None
}
