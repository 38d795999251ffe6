use super::models::ExternalEventPayload;
use crate::error::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Parameters of an upcoming-events listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Lower bound on event start
    pub time_min: DateTime<Utc>,
    pub max_results: u32,
    /// Expand recurring events into single instances
    pub single_events: bool,
    pub order_by: &'static str,
}

impl ListQuery {
    /// Events starting at or after `now`, earliest first
    pub fn upcoming(now: DateTime<Utc>, max_results: u32) -> Self {
        Self {
            time_min: now,
            max_results,
            single_events: true,
            order_by: "startTime",
        }
    }
}

/// Backend that stores the calendar
#[async_trait]
pub trait CalendarGateway: Send + Sync {
    /// Create one event and return it as stored
    async fn insert(
        &self,
        calendar_id: &str,
        payload: &ExternalEventPayload,
    ) -> AppResult<ExternalEventPayload>;

    /// List events in the order and quantity `query` asks for
    async fn list(&self, calendar_id: &str, query: &ListQuery)
        -> AppResult<Vec<ExternalEventPayload>>;
}
