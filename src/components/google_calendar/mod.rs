mod client;
pub mod token;

pub use client::{GoogleCalendarClient, GOOGLE_CALENDAR_API};
pub use token::{ServiceAccountKey, StaticToken, TokenManager, TokenSource};

use crate::config::Config;
use crate::error::AppResult;
use std::sync::Arc;
use tracing::info;

/// Build the Google Calendar client from the configured service account
pub fn connect(config: &Config) -> AppResult<GoogleCalendarClient> {
    let key = ServiceAccountKey::from_file(&config.google_service_account_file)?;
    info!("Using service account {}", key.client_email);

    let tokens: Arc<dyn TokenSource> = Arc::new(TokenManager::new(key));
    GoogleCalendarClient::new(tokens)
}
