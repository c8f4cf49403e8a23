//! `logs-adapter healthcheck`: probes a running adapter's `/health` route.
//!
//! Used as the container health command, where no shell or curl is available.

use std::time::Duration;
use thiserror::Error;

const DEFAULT_HTTP_PORT: u16 = 9098;
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Error, Debug)]
pub enum HealthcheckError {
    #[error("Healthcheck failed: could not create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Healthcheck failed: request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Healthcheck failed: health endpoint returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Probes the adapter on `SERVER_PORT`, or 9098 when unset or unparsable.
pub async fn healthcheck() -> Result<(), HealthcheckError> {
    let port = std::env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_HTTP_PORT);
    healthcheck_with_port(port).await
}

pub async fn healthcheck_with_port(port: u16) -> Result<(), HealthcheckError> {
    let client = reqwest::Client::builder()
        .timeout(PROBE_TIMEOUT)
        .build()
        .map_err(HealthcheckError::Client)?;

    let url = format!("http://127.0.0.1:{port}/health");
    let resp = client
        .get(&url)
        .send()
        .await
        .map_err(|source| HealthcheckError::Request {
            url: url.clone(),
            source,
        })?;

    if resp.status().is_success() {
        Ok(())
    } else {
        Err(HealthcheckError::Status(resp.status()))
    }
}
