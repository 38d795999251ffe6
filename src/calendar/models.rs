use crate::error::{validation_error, AppResult};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Title shown for events that come back without a summary
pub const UNTITLED_EVENT: &str = "Untitled";

/// Colour used when an event carries no colour of its own
pub const DEFAULT_EVENT_COLOR: &str = "#039be5";

/// Google Calendar's fixed event palette, indexed by `colorId`
const EVENT_PALETTE: [(&str, &str); 11] = [
    ("1", "#a4bdfc"),
    ("2", "#7ae7bf"),
    ("3", "#dbadff"),
    ("4", "#ff887c"),
    ("5", "#fbd75b"),
    ("6", "#ffb878"),
    ("7", "#46d6db"),
    ("8", "#e1e1e1"),
    ("9", "#5484ed"),
    ("10", "#51b749"),
    ("11", "#dc2127"),
];

/// Look up the display colour for a Google `colorId`
pub fn palette_color(color_id: &str) -> Option<&'static str> {
    EVENT_PALETTE
        .iter()
        .find(|(id, _)| *id == color_id)
        .map(|(_, hex)| *hex)
}

/// An inclusive, user-facing span of an event.
///
/// Both bounds are either calendar dates or offset date-times, never a mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    /// Whole days, `end` being the last day of the event
    AllDay { start: NaiveDate, end: NaiveDate },
    /// Explicit instants, each with the offset it was written in
    Timed {
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    },
}

impl DateRange {
    /// Build an all-day range, rejecting an end before the start
    pub fn all_day(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if end < start {
            return Err(validation_error("end before start"));
        }
        Ok(DateRange::AllDay { start, end })
    }

    /// Build a timed range, rejecting an end before the start
    pub fn timed(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> AppResult<Self> {
        if end < start {
            return Err(validation_error("end before start"));
        }
        Ok(DateRange::Timed { start, end })
    }

    pub fn is_all_day(&self) -> bool {
        matches!(self, DateRange::AllDay { .. })
    }

    /// Calendar date of the start, in the start's own offset
    pub fn start_date(&self) -> NaiveDate {
        match self {
            DateRange::AllDay { start, .. } => *start,
            DateRange::Timed { start, .. } => start.date_naive(),
        }
    }

    /// Calendar date of the end, in the end's own offset
    pub fn end_date(&self) -> NaiveDate {
        match self {
            DateRange::AllDay { end, .. } => *end,
            DateRange::Timed { end, .. } => end.date_naive(),
        }
    }

    /// Whether the event starts and ends on the same calendar day
    pub fn is_same_day(&self) -> bool {
        self.start_date() == self.end_date()
    }
}

/// Normalized calendar event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Google event id; `None` until the event has been created
    pub id: Option<String>,
    pub title: String,
    pub range: DateRange,
    /// Hex display colour, if the event has one
    pub color: Option<String>,
}

impl EventRecord {
    /// Colour to draw the event with
    pub fn color_or_default(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_EVENT_COLOR)
    }
}

/// Start or end of an event as Google Calendar sends it.
///
/// Exactly one of `date` (all-day) or `date_time` is expected; both are kept
/// as raw strings so one bad record cannot fail a whole list response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTimePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl EventTimePayload {
    /// All-day bound
    pub fn date(date: String) -> Self {
        Self {
            date: Some(date),
            ..Default::default()
        }
    }

    /// Timed bound
    pub fn date_time(date_time: String) -> Self {
        Self {
            date_time: Some(date_time),
            ..Default::default()
        }
    }
}

/// Calendar event in the Google Calendar v3 wire shape, used in both directions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalEventPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_id: Option<String>,
    #[serde(default)]
    pub start: EventTimePayload,
    #[serde(default)]
    pub end: EventTimePayload,
}
