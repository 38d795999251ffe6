use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// Bad user input, caught before any calendar call
    #[error("{0}")]
    #[diagnostic(code(sharedcal::validation))]
    Validation(String),

    /// A fetched event that could not be normalized
    #[error("Malformed event: {0}")]
    #[diagnostic(code(sharedcal::malformed_event))]
    MalformedEvent(String),

    #[error("Google Calendar API error: {0}")]
    #[diagnostic(code(sharedcal::google_calendar))]
    GoogleCalendar(String),

    #[error("Environment error: {0}")]
    #[diagnostic(code(sharedcal::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(sharedcal::config))]
    Config(String),

    #[error("Template error: {0}")]
    #[diagnostic(code(sharedcal::render))]
    Render(String),

    #[error(transparent)]
    #[diagnostic(code(sharedcal::io))]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    #[diagnostic(code(sharedcal::other))]
    Other(String),
}

impl From<askama::Error> for Error {
    fn from(err: askama::Error) -> Self {
        Error::Render(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::GoogleCalendar(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create validation errors
pub fn validation_error(message: &str) -> Error {
    Error::Validation(message.to_string())
}

/// Helper to create malformed event errors
pub fn malformed_event_error(message: &str) -> Error {
    Error::MalformedEvent(message.to_string())
}

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create Google Calendar errors
pub fn google_calendar_error(message: &str) -> Error {
    Error::GoogleCalendar(message.to_string())
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
