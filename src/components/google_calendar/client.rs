use super::token::TokenSource;
use crate::calendar::{CalendarGateway, ExternalEventPayload, ListQuery};
use crate::error::{google_calendar_error, AppResult};
use async_trait::async_trait;
use chrono::SecondsFormat;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Google Calendar v3 REST endpoint
pub const GOOGLE_CALENDAR_API: &str = "https://www.googleapis.com/calendar/v3";

/// One page of an events listing; items are decoded one by one
#[derive(Debug, Deserialize)]
struct EventsPage {
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

/// Google Calendar client
#[derive(Clone)]
pub struct GoogleCalendarClient {
    base_url: Url,
    client: Client,
    tokens: Arc<dyn TokenSource>,
}

impl GoogleCalendarClient {
    /// Create a client for the public Google endpoint
    pub fn new(tokens: Arc<dyn TokenSource>) -> AppResult<Self> {
        Self::with_base_url(GOOGLE_CALENDAR_API, tokens)
    }

    /// Create a client against another endpoint (used by tests)
    pub fn with_base_url(base_url: &str, tokens: Arc<dyn TokenSource>) -> AppResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| google_calendar_error(&format!("Failed to parse URL: {}", e)))?;

        Ok(Self {
            base_url,
            client: Client::new(),
            tokens,
        })
    }

    /// `{base}/calendars/{calendar_id}/events`, with the id escaped as one segment
    fn events_url(&self, calendar_id: &str) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| google_calendar_error("Calendar API URL cannot be a base"))?
            .pop_if_empty()
            .extend(["calendars", calendar_id, "events"]);
        Ok(url)
    }

    async fn bearer(&self) -> AppResult<String> {
        Ok(format!("Bearer {}", self.tokens.access_token().await?))
    }
}

/// Turn a non-2xx response into an error carrying the body
async fn check_status(response: Response, action: &str) -> AppResult<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let error_body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response".to_string());
    Err(google_calendar_error(&format!(
        "Failed to {}: HTTP {} - {}",
        action, status, error_body
    )))
}

#[async_trait]
impl CalendarGateway for GoogleCalendarClient {
    async fn insert(
        &self,
        calendar_id: &str,
        payload: &ExternalEventPayload,
    ) -> AppResult<ExternalEventPayload> {
        let url = self.events_url(calendar_id)?;
        debug!("Inserting event into {}", calendar_id);

        let response = self
            .client
            .post(url)
            .header("Authorization", self.bearer().await?)
            .json(payload)
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to create event: {}", e)))?;

        let response = check_status(response, "create event").await?;

        response
            .json()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to parse created event: {}", e)))
    }

    async fn list(
        &self,
        calendar_id: &str,
        query: &ListQuery,
    ) -> AppResult<Vec<ExternalEventPayload>> {
        let mut url = self.events_url(calendar_id)?;
        url.query_pairs_mut()
            .append_pair(
                "timeMin",
                &query.time_min.to_rfc3339_opts(SecondsFormat::Secs, true),
            )
            .append_pair("maxResults", &query.max_results.to_string())
            .append_pair("singleEvents", &query.single_events.to_string())
            .append_pair("orderBy", query.order_by);

        let response = self
            .client
            .get(url)
            .header("Authorization", self.bearer().await?)
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to fetch events: {}", e)))?;

        let response = check_status(response, "fetch events").await?;

        let page: EventsPage = response
            .json()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to parse events response: {}", e)))?;

        // A record with an unexpected shape is dropped, not the whole page
        let events = page
            .items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<ExternalEventPayload>(item) {
                Ok(event) => Some(event),
                Err(e) => {
                    warn!("Skipping undecodable event: {}", e);
                    None
                }
            })
            .collect();

        Ok(events)
    }
}
