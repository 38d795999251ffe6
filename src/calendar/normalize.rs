//! Conversion between form input, Google Calendar payloads and [`EventRecord`].

use super::models::{
    palette_color, DateRange, EventRecord, EventTimePayload, ExternalEventPayload, UNTITLED_EVENT,
};
use super::time::{
    convert_all_day_end, format_date, parse_date, parse_date_time, EndBound,
};
use crate::error::{malformed_event_error, validation_error, AppResult};
use chrono::NaiveDate;

/// Build the insert payload for an all-day event spanning `start_date..=end_date`.
///
/// The API treats an all-day end date as exclusive, so the payload's end is
/// the day after the last day the user picked.
pub fn build_insert_payload(
    title: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> AppResult<ExternalEventPayload> {
    let title = title.trim();
    if title.is_empty() {
        return Err(validation_error("empty title"));
    }

    let range = DateRange::all_day(start_date, end_date)?;
    let exclusive_end = convert_all_day_end(range.end_date(), EndBound::Exclusive)
        .ok_or_else(|| validation_error("end date out of range"))?;

    Ok(ExternalEventPayload {
        summary: Some(title.to_string()),
        start: EventTimePayload::date(format_date(range.start_date())),
        end: EventTimePayload::date(format_date(exclusive_end)),
        ..Default::default()
    })
}

/// Normalize one event from a list or insert response
pub fn parse_external_event(raw: &ExternalEventPayload) -> AppResult<EventRecord> {
    let range = parse_range(&raw.start, &raw.end)?;

    let title = raw
        .summary
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(UNTITLED_EVENT)
        .to_string();

    let id = raw.id.clone().filter(|id| !id.is_empty());
    let color = raw
        .color_id
        .as_deref()
        .and_then(palette_color)
        .map(str::to_string);

    Ok(EventRecord {
        id,
        title,
        range,
        color,
    })
}

fn parse_range(start: &EventTimePayload, end: &EventTimePayload) -> AppResult<DateRange> {
    match (start.date.as_deref(), start.date_time.as_deref()) {
        (Some(start_date), _) => {
            let end_date = end
                .date
                .as_deref()
                .ok_or_else(|| malformed_event_error("all-day event without an end date"))?;

            let start = parse_date(start_date)?;
            let end = convert_all_day_end(parse_date(end_date)?, EndBound::Inclusive)
                .ok_or_else(|| malformed_event_error("end date out of range"))?;

            DateRange::all_day(start, end)
                .map_err(|_| malformed_event_error("all-day event ends before it starts"))
        }
        (None, Some(start_date_time)) => {
            let end_date_time = end
                .date_time
                .as_deref()
                .ok_or_else(|| malformed_event_error("timed event without an end time"))?;

            let start = parse_date_time(start_date_time)?;
            let end = parse_date_time(end_date_time)?;

            DateRange::timed(start, end)
                .map_err(|_| malformed_event_error("timed event ends before it starts"))
        }
        (None, None) => Err(malformed_event_error("event start has neither date nor dateTime")),
    }
}
