//! Turns [`EventRecord`]s into list rows and calendar widget events.

use super::models::{DateRange, EventRecord};
use super::time::{convert_all_day_end, format_date, format_date_time, EndBound};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate};
use rust_i18n::t;
use serde::Serialize;

/// Time of day in captions
const TIME_FORMAT: &str = "%H:%M";

/// Day, month and time for timed events spanning several days
const DAY_TIME_FORMAT: &str = "%d/%m %H:%M";

/// One row of the upcoming events list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayGroup {
    /// Date badge, a single day or a short range
    pub badge: String,
    pub title: String,
    /// Detail caption under the title
    pub caption: String,
    pub color: String,
}

/// Which caption a list row gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionKind {
    /// Single all-day day: "all day"
    AllDay,
    /// Several whole days: "10 June – 12 June"
    DateSpan,
    /// Timed, same day: "09:00 to 10:30"
    TimeSpan,
    /// Timed across days: "10/06 22:00 – 11/06 02:00"
    DayTimeSpan,
}

impl CaptionKind {
    /// Pick the caption variant. Nothing but these two flags decides it.
    pub fn select(is_all_day: bool, same_day: bool) -> Self {
        match (is_all_day, same_day) {
            (true, true) => CaptionKind::AllDay,
            (true, false) => CaptionKind::DateSpan,
            (false, true) => CaptionKind::TimeSpan,
            (false, false) => CaptionKind::DayTimeSpan,
        }
    }

    pub fn for_range(range: &DateRange) -> Self {
        Self::select(range.is_all_day(), range.is_same_day())
    }
}

/// Event in the shape a calendar grid widget consumes.
///
/// All-day ends are exclusive here, as in the Google API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub start: String,
    pub end: String,
    pub all_day: bool,
    pub color: String,
}

/// Format fetched events as list rows, keeping their order
pub fn format_for_list(events: &[EventRecord], locale: &str) -> Vec<DisplayGroup> {
    events
        .iter()
        .map(|event| DisplayGroup {
            badge: badge(&event.range, locale),
            title: event.title.clone(),
            caption: caption(&event.range, locale),
            color: event.color_or_default().to_string(),
        })
        .collect()
}

/// Format events for a calendar grid widget, one to one and in order
pub fn format_for_grid(events: &[EventRecord]) -> Vec<GridEvent> {
    events
        .iter()
        .map(|event| {
            let (start, end) = match &event.range {
                DateRange::AllDay { start, end } => {
                    // Only NaiveDate::MAX has no successor
                    let exclusive_end =
                        convert_all_day_end(*end, EndBound::Exclusive).unwrap_or(*end);
                    (format_date(*start), format_date(exclusive_end))
                }
                DateRange::Timed { start, end } => {
                    (format_date_time(start), format_date_time(end))
                }
            };

            GridEvent {
                id: event.id.clone(),
                title: event.title.clone(),
                start,
                end,
                all_day: event.range.is_all_day(),
                color: event.color_or_default().to_string(),
            }
        })
        .collect()
}

fn badge(range: &DateRange, locale: &str) -> String {
    if range.is_all_day() && range.is_same_day() {
        long_date(range.start_date(), locale)
    } else {
        t!(
            "date_range",
            locale = locale,
            start = short_date(range.start_date(), locale),
            end = short_date(range.end_date(), locale)
        )
        .into_owned()
    }
}

fn caption(range: &DateRange, locale: &str) -> String {
    match (CaptionKind::for_range(range), range) {
        (CaptionKind::AllDay, _) => t!("caption_all_day", locale = locale).into_owned(),
        (CaptionKind::DateSpan, _) => t!(
            "date_range",
            locale = locale,
            start = long_date(range.start_date(), locale),
            end = long_date(range.end_date(), locale)
        )
        .into_owned(),
        (CaptionKind::TimeSpan, DateRange::Timed { start, end }) => t!(
            "caption_time_range",
            locale = locale,
            start = start.format(TIME_FORMAT).to_string(),
            end = end.format(TIME_FORMAT).to_string()
        )
        .into_owned(),
        (CaptionKind::DayTimeSpan, DateRange::Timed { start, end }) => t!(
            "date_range",
            locale = locale,
            start = day_time(start),
            end = day_time(end)
        )
        .into_owned(),
        // Timed captions are only ever selected for timed ranges
        (_, DateRange::AllDay { .. }) => t!("caption_all_day", locale = locale).into_owned(),
    }
}

fn day_time(value: &DateTime<FixedOffset>) -> String {
    value.format(DAY_TIME_FORMAT).to_string()
}

/// "10 June"
fn long_date(date: NaiveDate, locale: &str) -> String {
    t!(
        "date_day_month",
        locale = locale,
        day = date.day(),
        month = month_long(date.month(), locale)
    )
    .into_owned()
}

/// "10 Jun"
fn short_date(date: NaiveDate, locale: &str) -> String {
    t!(
        "date_day_month",
        locale = locale,
        day = date.day(),
        month = month_short(date.month(), locale)
    )
    .into_owned()
}

fn month_long(month: u32, locale: &str) -> String {
    match month {
        1 => t!("month_long_january", locale = locale),
        2 => t!("month_long_february", locale = locale),
        3 => t!("month_long_march", locale = locale),
        4 => t!("month_long_april", locale = locale),
        5 => t!("month_long_may", locale = locale),
        6 => t!("month_long_june", locale = locale),
        7 => t!("month_long_july", locale = locale),
        8 => t!("month_long_august", locale = locale),
        9 => t!("month_long_september", locale = locale),
        10 => t!("month_long_october", locale = locale),
        11 => t!("month_long_november", locale = locale),
        _ => t!("month_long_december", locale = locale),
    }
    .into_owned()
}

fn month_short(month: u32, locale: &str) -> String {
    match month {
        1 => t!("month_short_january", locale = locale),
        2 => t!("month_short_february", locale = locale),
        3 => t!("month_short_march", locale = locale),
        4 => t!("month_short_april", locale = locale),
        5 => t!("month_short_may", locale = locale),
        6 => t!("month_short_june", locale = locale),
        7 => t!("month_short_july", locale = locale),
        8 => t!("month_short_august", locale = locale),
        9 => t!("month_short_september", locale = locale),
        10 => t!("month_short_october", locale = locale),
        11 => t!("month_short_november", locale = locale),
        _ => t!("month_short_december", locale = locale),
    }
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::models::{EventTimePayload, ExternalEventPayload, DEFAULT_EVENT_COLOR};
    use crate::calendar::normalize::parse_external_event;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(y, mo, d, h, mi, 0)
            .unwrap()
    }

    fn all_day(title: &str, start: NaiveDate, end: NaiveDate) -> EventRecord {
        EventRecord {
            id: Some(format!("{}-id", title)),
            title: title.to_string(),
            range: DateRange::all_day(start, end).unwrap(),
            color: None,
        }
    }

    fn timed(title: &str, start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> EventRecord {
        EventRecord {
            id: Some(format!("{}-id", title)),
            title: title.to_string(),
            range: DateRange::timed(start, end).unwrap(),
            color: Some("#51b749".to_string()),
        }
    }

    #[test]
    fn test_caption_kind_selection() {
        assert_eq!(CaptionKind::select(true, true), CaptionKind::AllDay);
        assert_eq!(CaptionKind::select(true, false), CaptionKind::DateSpan);
        assert_eq!(CaptionKind::select(false, true), CaptionKind::TimeSpan);
        assert_eq!(CaptionKind::select(false, false), CaptionKind::DayTimeSpan);
    }

    #[test]
    fn test_single_all_day_row() {
        let rows = format_for_list(&[all_day("Trip", date(2024, 6, 10), date(2024, 6, 10))], "en");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].badge, "10 June");
        assert_eq!(rows[0].title, "Trip");
        assert_eq!(rows[0].caption, "all day");
        assert_eq!(rows[0].color, DEFAULT_EVENT_COLOR);
    }

    #[test]
    fn test_multi_day_all_day_row() {
        let rows = format_for_list(&[all_day("Conf", date(2024, 6, 10), date(2024, 6, 12))], "en");

        assert_eq!(rows[0].badge, "10 Jun – 12 Jun");
        assert_eq!(rows[0].caption, "10 June – 12 June");
    }

    #[test]
    fn test_timed_same_day_row() {
        let rows = format_for_list(
            &[timed("Standup", utc(2024, 6, 10, 9, 0), utc(2024, 6, 10, 10, 30))],
            "en",
        );

        assert_eq!(rows[0].caption, "09:00 to 10:30");
        assert_eq!(rows[0].badge, "10 Jun – 10 Jun");
        assert_eq!(rows[0].color, "#51b749");
    }

    #[test]
    fn test_timed_multi_day_row() {
        let rows = format_for_list(
            &[timed("Night shift", utc(2024, 6, 10, 22, 0), utc(2024, 6, 11, 6, 15))],
            "en",
        );

        assert_eq!(rows[0].caption, "10/06 22:00 – 11/06 06:15");
        assert_eq!(rows[0].badge, "10 Jun – 11 Jun");
    }

    #[test]
    fn test_list_keeps_fetch_order() {
        let events = vec![
            all_day("B", date(2024, 6, 12), date(2024, 6, 12)),
            all_day("A", date(2024, 6, 10), date(2024, 6, 10)),
        ];
        let titles: Vec<_> = format_for_list(&events, "en")
            .into_iter()
            .map(|row| row.title)
            .collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[test]
    fn test_french_locale() {
        let rows = format_for_list(
            &[
                all_day("Voyage", date(2024, 6, 10), date(2024, 6, 10)),
                all_day("Congrès", date(2024, 8, 30), date(2024, 9, 2)),
            ],
            "fr",
        );

        assert_eq!(rows[0].badge, "10 juin");
        assert_eq!(rows[0].caption, "toute la journée");
        assert_eq!(rows[1].badge, "30 août – 2 sept.");
        assert_eq!(rows[1].caption, "30 août – 2 septembre");
    }

    #[test]
    fn test_unknown_locale_falls_back_to_english() {
        let rows = format_for_list(&[all_day("Trip", date(2024, 6, 10), date(2024, 6, 10))], "xx");
        assert_eq!(rows[0].badge, "10 June");
    }

    #[test]
    fn test_grid_reapplies_exclusive_end() {
        let events = vec![
            all_day("Trip", date(2024, 6, 10), date(2024, 6, 10)),
            timed("Standup", utc(2024, 6, 10, 9, 0), utc(2024, 6, 10, 10, 30)),
        ];

        let grid = format_for_grid(&events);
        assert_eq!(grid.len(), 2);

        assert_eq!(grid[0].id.as_deref(), Some("Trip-id"));
        assert_eq!(grid[0].start, "2024-06-10");
        assert_eq!(grid[0].end, "2024-06-11");
        assert!(grid[0].all_day);
        assert_eq!(grid[0].color, DEFAULT_EVENT_COLOR);

        assert_eq!(grid[1].start, "2024-06-10T09:00:00+00:00");
        assert_eq!(grid[1].end, "2024-06-10T10:30:00+00:00");
        assert!(!grid[1].all_day);
    }

    #[test]
    fn test_grid_round_trips_raw_end_date() {
        for (start, end) in [
            ("2024-06-10", "2024-06-11"),
            ("2024-06-10", "2024-06-13"),
            ("2024-12-31", "2025-01-01"),
            ("2024-02-28", "2024-03-01"),
        ] {
            let raw = ExternalEventPayload {
                id: Some("evt".to_string()),
                summary: Some("Trip".to_string()),
                start: EventTimePayload::date(start.to_string()),
                end: EventTimePayload::date(end.to_string()),
                ..Default::default()
            };

            let record = parse_external_event(&raw).unwrap();
            let grid = format_for_grid(&[record]);
            assert_eq!(grid[0].start, start);
            assert_eq!(grid[0].end, end);
        }
    }

    #[test]
    fn test_grid_event_json_shape() {
        let grid = format_for_grid(&[all_day("Trip", date(2024, 6, 10), date(2024, 6, 10))]);
        let json = serde_json::to_value(&grid[0]).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": "Trip-id",
                "title": "Trip",
                "start": "2024-06-10",
                "end": "2024-06-11",
                "allDay": true,
                "color": DEFAULT_EVENT_COLOR
            })
        );
    }
}
