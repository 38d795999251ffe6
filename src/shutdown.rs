use tracing::{error, info};

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
#[cfg(windows)]
use tokio::signal::windows::{ctrl_break, ctrl_c};

/// Resolve when the process is asked to stop, letting in-flight requests finish
#[cfg(unix)]
pub async fn wait_for_signal() {
    // SIGTERM is what container runtimes send on stop
    let (mut sigterm, mut sigint) =
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(sigterm), Ok(sigint)) => (sigterm, sigint),
            (Err(e), _) | (_, Err(e)) => {
                error!("Failed to install signal handlers: {}", e);
                return std::future::pending().await;
            }
        };

    tokio::select! {
        _ = sigterm.recv() => {
            info!("Received SIGTERM signal, initiating graceful shutdown");
        }
        _ = sigint.recv() => {
            info!("Received SIGINT signal, initiating graceful shutdown");
        }
    }
}

/// Resolve when the process is asked to stop, letting in-flight requests finish
#[cfg(windows)]
pub async fn wait_for_signal() {
    let (mut ctrlc, mut ctrlbreak) = match (ctrl_c(), ctrl_break()) {
        (Ok(ctrlc), Ok(ctrlbreak)) => (ctrlc, ctrlbreak),
        (Err(e), _) | (_, Err(e)) => {
            error!("Failed to install signal handlers: {}", e);
            return std::future::pending().await;
        }
    };

    tokio::select! {
        _ = ctrlc.recv() => {
            info!("Received Ctrl+C signal, initiating graceful shutdown");
        }
        _ = ctrlbreak.recv() => {
            info!("Received Ctrl+Break signal, initiating graceful shutdown");
        }
    }
}
