pub mod router;
pub mod server;
mod state;
pub mod tracing;

use crate::adapter::openobserve::wait_until_healthy;
use crate::config;
use crate::error::AdapterError;
use ::tracing::{error, info};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Added to the backend timeout so a slow backend call is reported as a
/// backend failure before the request deadline answers 408.
const REQUEST_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

/// Application entry point. Initializes tracing and configuration, waits for
/// the backend to become healthy, then serves until SIGINT/SIGTERM.
pub async fn run() -> Result<(), AdapterError> {
    // Handle healthcheck subcommand (for Docker healthcheck in distroless image)
    if std::env::args().nth(1).as_deref() == Some("healthcheck") {
        match crate::healthcheck().await {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1)
            }
        }
    }

    tracing::init_tracing(config::log_level_from_env());

    let settings = config::get_configuration()
        .inspect_err(|e| error!(error = %e, "Failed to load configuration"))?;
    info!(
        log_level = %settings.log_level,
        openobserve_url = %settings.openobserve_url,
        openobserve_org = %settings.openobserve_org,
        openobserve_stream = %settings.openobserve_stream,
        openobserve_user = %settings.openobserve_user,
        openobserve_password = %settings.masked_password(),
        server_port = settings.server_port,
        "Configuration loaded from environment"
    );

    // Cancelled on SIGINT/SIGTERM; aborts the startup health wait and drains the server.
    let shutdown_token = CancellationToken::new();
    tokio::spawn(server::cancel_on_signal(shutdown_token.clone()));

    let app_state = state::AppState::from_settings(&settings)?;

    info!(url = %settings.openobserve_url, "Checking OpenObserve connectivity");
    wait_until_healthy(
        &app_state.client,
        settings.health_check_attempts,
        settings.health_check_interval,
        &shutdown_token,
    )
    .await
    .inspect_err(|e| {
        error!(error = %e, "Cannot continue without OpenObserve, shutting down");
    })?;

    let app = router::with_request_timeout(
        router::api_router(app_state.backend),
        settings.backend_timeout + REQUEST_TIMEOUT_MARGIN,
    );

    server::serve(app, settings.server_port, shutdown_token).await
}
