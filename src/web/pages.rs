use crate::calendar::DisplayGroup;
use askama::Template;
use rust_i18n::t;

/// Translated page labels
#[derive(Debug, Clone)]
pub struct Labels {
    pub add_event: String,
    pub event_title: String,
    pub start_date: String,
    pub end_date: String,
    pub submit: String,
    pub upcoming: String,
    pub no_events: String,
    pub list_view: String,
    pub calendar_view: String,
}

impl Labels {
    pub fn new(locale: &str) -> Self {
        Self {
            add_event: t!("page_add_event", locale = locale).into_owned(),
            event_title: t!("page_event_title", locale = locale).into_owned(),
            start_date: t!("page_start_date", locale = locale).into_owned(),
            end_date: t!("page_end_date", locale = locale).into_owned(),
            submit: t!("page_submit", locale = locale).into_owned(),
            upcoming: t!("page_upcoming", locale = locale).into_owned(),
            no_events: t!("page_no_events", locale = locale).into_owned(),
            list_view: t!("page_list_view", locale = locale).into_owned(),
            calendar_view: t!("page_calendar_view", locale = locale).into_owned(),
        }
    }
}

/// Outcome message shown above the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    /// CSS class, `success` or `error`
    pub kind: &'static str,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: "success",
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: "error",
        }
    }
}

/// Links between the views; every one carries the access key forward
#[derive(Debug, Clone)]
pub struct Links {
    pub list: String,
    pub calendar: String,
    pub events_api: String,
}

impl Links {
    pub fn new(key: &str) -> Self {
        let key = urlencoding::encode(key);
        Self {
            list: format!("/?key={}", key),
            calendar: format!("/calendar?key={}", key),
            events_api: format!("/api/events?key={}", key),
        }
    }
}

/// List view with the add-event form
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub lang: String,
    pub calendar_name: String,
    pub labels: Labels,
    pub links: Links,
    pub notice: Option<Notice>,
    pub groups: Vec<DisplayGroup>,
    /// Set when the listing failed; no list is shown then
    pub list_error: Option<String>,
    /// Default for the date inputs, `YYYY-MM-DD`
    pub today: String,
}

/// Month grid view, filled in the browser from the events API
#[derive(Template)]
#[template(path = "calendar.html")]
pub struct CalendarPage {
    pub lang: String,
    pub calendar_name: String,
    pub labels: Labels,
    pub links: Links,
}

#[derive(Template)]
#[template(path = "denied.html")]
pub struct DeniedPage {
    pub lang: String,
    pub message: String,
}

impl DeniedPage {
    pub fn new(locale: &str) -> Self {
        Self {
            lang: locale.to_string(),
            message: t!("page_access_denied", locale = locale).into_owned(),
        }
    }
}
