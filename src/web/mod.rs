pub mod access;
pub mod handlers;
pub mod pages;

use crate::calendar::CalendarGateway;
use crate::config::Config;
use crate::error::Error;
use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::error;

use self::access::require_access_key;
use self::handlers::{
    calendar_handler, create_event_handler, events_api_handler, health_handler, index_handler,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Calendar backend
    pub gateway: Arc<dyn CalendarGateway>,
}

impl AppState {
    pub fn new(config: Config, gateway: Arc<dyn CalendarGateway>) -> Self {
        Self {
            config: Arc::new(config),
            gateway,
        }
    }
}

/// Build the router; everything but `/health` sits behind the access key
pub fn router(state: AppState) -> Router {
    let gated = Router::new()
        .route("/", get(index_handler).post(create_event_handler))
        .route("/calendar", get(calendar_handler))
        .route("/api/events", get(events_api_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_access_key,
        ));

    Router::new()
        .route("/health", get(health_handler))
        .merge(gated)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::GoogleCalendar(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        error!("Request failed with {}: {}", status, self);
        (status, self.to_string()).into_response()
    }
}
