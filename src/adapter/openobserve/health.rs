use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::OpenObserveClient;
use crate::error::AdapterError;

/// Deadline for a single startup health probe.
pub const HEALTH_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocks startup until the backend reports healthy.
///
/// Probes up to `attempts` times with `interval` between attempts. Returns the
/// last probe error once attempts run out, or [`AdapterError::Interrupted`]
/// when `shutdown` fires while waiting.
pub async fn wait_until_healthy(
    client: &OpenObserveClient,
    attempts: u32,
    interval: Duration,
    shutdown: &CancellationToken,
) -> Result<(), AdapterError> {
    let attempts = attempts.max(1);
    let mut attempt = 1;

    loop {
        let probe = tokio::select! {
            biased;
            () = shutdown.cancelled() => return Err(AdapterError::Interrupted),
            result = client.check_health() => result,
        };

        match probe {
            Ok(()) => {
                info!(attempt, "Successfully connected to OpenObserve");
                return Ok(());
            }
            Err(source) if attempt >= attempts => {
                return Err(AdapterError::BackendUnavailable { attempts, source });
            }
            Err(e) => {
                warn!(
                    attempt,
                    attempts,
                    retry_in_ms = interval.as_millis() as u64,
                    error = %e,
                    "OpenObserve health check failed"
                );
            }
        }

        tokio::select! {
            biased;
            () = shutdown.cancelled() => return Err(AdapterError::Interrupted),
            () = tokio::time::sleep(interval) => {}
        }
        attempt += 1;
    }
}
