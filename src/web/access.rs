use super::pages::DeniedPage;
use super::AppState;
use askama::Template;
use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{error, warn};

/// The `key` query parameter every gated page expects
#[derive(Debug, Default, Deserialize)]
pub struct KeyQuery {
    pub key: Option<String>,
}

impl KeyQuery {
    pub fn key(&self) -> &str {
        self.key.as_deref().unwrap_or_default()
    }
}

/// Stop the request before any handler runs unless it carries the shared key
pub async fn require_access_key(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
    request: Request,
    next: Next,
) -> Response {
    if state.config.is_valid_key(query.key.as_deref()) {
        return next.run(request).await;
    }

    warn!("Rejected request to {} without a valid key", request.uri().path());

    match DeniedPage::new(&state.config.locale).render() {
        Ok(html) => (StatusCode::FORBIDDEN, Html(html)).into_response(),
        Err(e) => {
            error!("Failed to render access denied page: {}", e);
            StatusCode::FORBIDDEN.into_response()
        }
    }
}
