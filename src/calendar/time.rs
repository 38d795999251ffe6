use crate::error::{malformed_event_error, AppResult};
use chrono::{DateTime, FixedOffset, NaiveDate};

/// Wire format for all-day dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which convention an all-day end date follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndBound {
    /// The end date is the last day of the event (user facing)
    Inclusive,
    /// The end date is the day after the event (Google Calendar, calendar widgets)
    Exclusive,
}

/// Convert an all-day end date into the given convention.
///
/// This is the only place the one-day shift between the inclusive form a user
/// types and the exclusive form the API stores lives. Insert, parse and the
/// widget encoding all go through it. Returns `None` at the ends of the
/// representable date range.
pub fn convert_all_day_end(end: NaiveDate, to: EndBound) -> Option<NaiveDate> {
    match to {
        EndBound::Exclusive => end.succ_opt(),
        EndBound::Inclusive => end.pred_opt(),
    }
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| malformed_event_error(&format!("Failed to parse date '{}': {}", value, e)))
}

/// Format a calendar date for the wire
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse an RFC 3339 date-time carrying an explicit offset.
///
/// A trailing `Z` is rewritten to `+00:00` first so UTC instants keep a
/// fixed offset like every other timed bound.
pub fn parse_date_time(value: &str) -> AppResult<DateTime<FixedOffset>> {
    let value = value.trim();
    let normalized = match value.strip_suffix('Z').or_else(|| value.strip_suffix('z')) {
        Some(stripped) => format!("{}+00:00", stripped),
        None => value.to_string(),
    };

    DateTime::parse_from_rfc3339(&normalized).map_err(|e| {
        malformed_event_error(&format!("Failed to parse datetime '{}': {}", value, e))
    })
}

/// Format a date-time for the wire, keeping its original offset
pub fn format_date_time(value: &DateTime<FixedOffset>) -> String {
    value.to_rfc3339()
}
