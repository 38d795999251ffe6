use crate::error::{config_error, env_error, AppResult};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;

/// Default page heading when CALENDAR_NAME is not set
pub const DEFAULT_CALENDAR_NAME: &str = "Calendar";

/// Upcoming events shown per page
pub const DEFAULT_MAX_RESULTS: u32 = 10;

/// Main configuration structure for the web front-end
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Shared secret expected in the `key` query parameter
    pub access_key: String,
    /// Google Calendar ID to read from and write to
    pub google_calendar_id: String,
    /// Path to the service account JSON key
    pub google_service_account_file: String,
    /// Heading shown above the calendar
    pub calendar_name: String,
    /// Locale for month names and page labels
    pub locale: String,
    /// Timezone used for the form's default date
    pub timezone: String,
    /// Address to bind the HTTP server to
    pub host: String,
    /// Port to bind the HTTP server to
    pub port: u16,
    /// Maximum number of upcoming events to fetch
    pub max_results: u32,
}

impl Config {
    /// Load configuration from environment
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // Required environment variables
        let access_key = env::var("ACCESS_KEY").map_err(|_| env_error("ACCESS_KEY"))?;
        let google_calendar_id =
            env::var("GOOGLE_CALENDAR_ID").map_err(|_| env_error("GOOGLE_CALENDAR_ID"))?;
        let google_service_account_file = env::var("GOOGLE_SERVICE_ACCOUNT_FILE")
            .map_err(|_| env_error("GOOGLE_SERVICE_ACCOUNT_FILE"))?;

        if access_key.trim().is_empty() {
            return Err(config_error("ACCESS_KEY must not be empty"));
        }

        let calendar_name =
            env::var("CALENDAR_NAME").unwrap_or_else(|_| String::from(DEFAULT_CALENDAR_NAME));
        let locale = env::var("CALENDAR_LOCALE").unwrap_or_else(|_| String::from("en"));
        let timezone = env::var("TIMEZONE").unwrap_or_else(|_| String::from("UTC"));
        let host = env::var("HOST").unwrap_or_else(|_| String::from("127.0.0.1"));

        // Parse numeric values
        let port = match env::var("PORT") {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|_| config_error("Invalid PORT format"))?,
            Err(_) => 3000,
        };
        let max_results = match env::var("MAX_RESULTS") {
            Ok(value) => value
                .parse::<u32>()
                .map_err(|_| config_error("Invalid MAX_RESULTS format"))?,
            Err(_) => DEFAULT_MAX_RESULTS,
        };

        let config = Config {
            access_key,
            google_calendar_id,
            google_service_account_file,
            calendar_name,
            locale,
            timezone,
            host,
            port,
            max_results,
        };

        // Reject unknown zones up front rather than on the first page load
        config.tz()?;

        Ok(config)
    }

    /// Parse the configured timezone
    pub fn tz(&self) -> AppResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| config_error(&format!("Invalid TIMEZONE: {}", self.timezone)))
    }

    /// Today's date in the configured timezone
    pub fn today(&self) -> AppResult<NaiveDate> {
        Ok(Utc::now().with_timezone(&self.tz()?).date_naive())
    }

    /// Check a request-supplied key against the shared secret
    pub fn is_valid_key(&self, key: Option<&str>) -> bool {
        key == Some(self.access_key.as_str())
    }
}
