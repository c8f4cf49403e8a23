use crate::error::AdapterError;
use axum::Router;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// How long in-flight requests may keep running once shutdown starts.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Serve `app` on `0.0.0.0:<http_port>` until `shutdown_token` is cancelled.
pub async fn serve(
    app: Router,
    http_port: u16,
    shutdown_token: CancellationToken,
) -> Result<(), AdapterError> {
    let bind_addr = format!("0.0.0.0:{http_port}");
    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| AdapterError::Bind {
            address: bind_addr.clone(),
            source: e,
        })?;
    info!("Server listening on {}", listener.local_addr()?);
    info!("  - GET    /health");
    info!("  - POST   /api/v1/logs/query");
    info!("  - POST   /api/v1/alerts/rules/{{ruleName}}");
    info!("  - DELETE /api/v1/alerts/rules/{{ruleName}}");

    serve_on(listener, app, shutdown_token, SHUTDOWN_GRACE).await
}

/// Serve on an already bound listener.
///
/// After `shutdown_token` fires, in-flight requests get `grace` to finish.
/// Returns once they have, or once `grace` runs out; connections still open
/// then end with the runtime.
pub async fn serve_on(
    listener: TcpListener,
    app: Router,
    shutdown_token: CancellationToken,
    grace: Duration,
) -> Result<(), AdapterError> {
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_token.clone().cancelled_owned())
        .into_future();

    let drain_deadline = async {
        shutdown_token.cancelled().await;
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        result = server => result?,
        () = drain_deadline => {
            warn!(
                grace_ms = grace.as_millis() as u64,
                "Graceful shutdown timed out, dropping in-flight requests"
            );
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Cancel `token` on the first SIGINT or SIGTERM.
pub async fn cancel_on_signal(token: CancellationToken) {
    shutdown_signal().await;
    token.cancel();
}

/// Wait for SIGTERM or SIGINT (Ctrl+C) for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT, initiating graceful shutdown"),
        () = terminate => info!("Received SIGTERM, initiating graceful shutdown"),
    }
}
