use super::gateway::{CalendarGateway, ListQuery};
use super::models::{EventRecord, ExternalEventPayload};
use super::normalize::{build_insert_payload, parse_external_event};
use crate::error::AppResult;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, warn};

/// Validate and create an all-day event.
///
/// Validation runs before the gateway is touched, so bad input never
/// reaches the calendar.
pub async fn add_event(
    gateway: &dyn CalendarGateway,
    calendar_id: &str,
    title: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> AppResult<EventRecord> {
    let payload = build_insert_payload(title, start_date, end_date)?;
    let created = gateway.insert(calendar_id, &payload).await?;

    let record = parse_external_event(&created)?;
    info!(
        "Created event {:?} ({} to {})",
        record.id,
        record.range.start_date(),
        record.range.end_date()
    );
    Ok(record)
}

/// Fetch upcoming events, dropping any that cannot be normalized
pub async fn fetch_upcoming(
    gateway: &dyn CalendarGateway,
    calendar_id: &str,
    now: DateTime<Utc>,
    max_results: u32,
) -> AppResult<Vec<EventRecord>> {
    let raw = gateway
        .list(calendar_id, &ListQuery::upcoming(now, max_results))
        .await?;
    Ok(collect_events(&raw))
}

/// Normalize a list response, skipping malformed records
pub fn collect_events(raw: &[ExternalEventPayload]) -> Vec<EventRecord> {
    raw.iter()
        .filter_map(|event| match parse_external_event(event) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping event {:?}: {}", event.id, e);
                None
            }
        })
        .collect()
}
