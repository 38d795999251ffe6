use crate::calendar::CalendarGateway;
use crate::components::google_calendar;
use crate::config::Config;
use crate::error::Error;
use crate::shutdown;
use crate::web::{self, AppState};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => {
            info!(
                "Serving calendar '{}' with locale {}",
                config.calendar_name, config.locale
            );
            Ok(config)
        }
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Connect to Google Calendar and serve the web front-end until a shutdown signal
pub async fn start_server(config: Config) -> miette::Result<()> {
    let gateway: Arc<dyn CalendarGateway> = Arc::new(google_calendar::connect(&config)?);

    let addr = format!("{}:{}", config.host, config.port);
    let app = web::router(AppState::new(config, gateway));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(Error::from)?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::wait_for_signal())
        .await
        .map_err(Error::from)?;

    info!("Server shut down");
    Ok(())
}
