use super::access::KeyQuery;
use super::pages::{CalendarPage, IndexPage, Labels, Links, Notice};
use super::AppState;
use crate::calendar::service::{add_event, fetch_upcoming};
use crate::calendar::time::{format_date, DATE_FORMAT};
use crate::calendar::{format_for_grid, format_for_list, EventRecord, GridEvent};
use crate::error::{validation_error, AppResult};
use askama::Template;
use axum::{
    extract::{Form, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{NaiveDate, Utc};
use rust_i18n::t;
use serde::Deserialize;
use tracing::{error, info, warn};

/// Fields of the add-event form
#[derive(Debug, Clone, Deserialize)]
pub struct EventForm {
    pub title: String,
    pub start_date: String,
    /// Empty means a single-day event
    #[serde(default)]
    pub end_date: String,
}

/// List view
pub async fn index_handler(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> AppResult<Response> {
    render_index(&state, query.key(), None).await
}

/// Add-event form submission.
///
/// Whatever happens to the insert, the list is fetched and shown again.
pub async fn create_event_handler(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
    Form(form): Form<EventForm>,
) -> AppResult<Response> {
    let locale = state.config.locale.as_str();

    let notice = match submit_event(&state, &form).await {
        Ok(record) => {
            info!("Event '{}' added", record.title);
            Notice::success(t!("event_added", locale = locale, title = record.title))
        }
        Err(e) => {
            warn!("Failed to add event: {}", e);
            Notice::error(t!("event_add_failed", locale = locale, error = e.to_string()))
        }
    };

    render_index(&state, query.key(), Some(notice)).await
}

/// Month grid view
pub async fn calendar_handler(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> AppResult<Html<String>> {
    let locale = state.config.locale.as_str();
    let page = CalendarPage {
        lang: locale.to_string(),
        calendar_name: state.config.calendar_name.clone(),
        labels: Labels::new(locale),
        links: Links::new(query.key()),
    };

    Ok(Html(page.render()?))
}

/// Upcoming events for the grid widget
pub async fn events_api_handler(State(state): State<AppState>) -> AppResult<Json<Vec<GridEvent>>> {
    let events = fetch_upcoming(
        state.gateway.as_ref(),
        &state.config.google_calendar_id,
        Utc::now(),
        state.config.max_results,
    )
    .await?;

    Ok(Json(format_for_grid(&events)))
}

/// Health check, outside the access gate
pub async fn health_handler() -> &'static str {
    "OK"
}

async fn submit_event(state: &AppState, form: &EventForm) -> AppResult<EventRecord> {
    let (start_date, end_date) = parse_form_dates(form, &state.config.locale)?;

    add_event(
        state.gateway.as_ref(),
        &state.config.google_calendar_id,
        &form.title,
        start_date,
        end_date,
    )
    .await
}

/// Read the form's dates; a blank end date means the same day as the start
pub fn parse_form_dates(form: &EventForm, locale: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let parse = |value: &str| {
        NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
            validation_error(&t!("invalid_date", locale = locale, value = value.to_string()))
        })
    };

    let start_date = parse(&form.start_date)?;
    let end_date = if form.end_date.trim().is_empty() {
        start_date
    } else {
        parse(&form.end_date)?
    };

    Ok((start_date, end_date))
}

async fn render_index(state: &AppState, key: &str, notice: Option<Notice>) -> AppResult<Response> {
    let config = &state.config;
    let locale = config.locale.as_str();

    let (groups, list_error) = match fetch_upcoming(
        state.gateway.as_ref(),
        &config.google_calendar_id,
        Utc::now(),
        config.max_results,
    )
    .await
    {
        Ok(events) => (format_for_list(&events, locale), None),
        Err(e) => {
            error!("Failed to fetch events: {}", e);
            let message = t!("events_fetch_failed", locale = locale, error = e.to_string());
            (Vec::new(), Some(message.into_owned()))
        }
    };

    let status = if list_error.is_some() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };

    let page = IndexPage {
        lang: locale.to_string(),
        calendar_name: config.calendar_name.clone(),
        labels: Labels::new(locale),
        links: Links::new(key),
        notice,
        groups,
        list_error,
        today: format_date(config.today()?),
    };

    Ok((status, Html(page.render()?)).into_response())
}
