//! OpenObserve implementation of [`LogBackend`](crate::port::LogBackend).

mod client;
mod health;
pub mod normalize;

pub use client::{OpenObserveClient, SearchResponse};
pub use health::{HEALTH_PROBE_TIMEOUT, wait_until_healthy};

use crate::config::Settings;
use std::time::Duration;

/// Connection settings for [`OpenObserveClient`].
#[derive(Clone)]
pub struct OpenObserveConfig {
    pub base_url: String,
    pub org: String,
    pub stream: String,
    pub user: String,
    pub password: String,
    /// Notification destination attached to every created alert.
    pub alert_destination: String,
    pub timeout: Duration,
}

impl OpenObserveConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            base_url: settings.openobserve_url.clone(),
            org: settings.openobserve_org.clone(),
            stream: settings.openobserve_stream.clone(),
            user: settings.openobserve_user.clone(),
            password: settings.openobserve_password.clone(),
            alert_destination: settings.alert_destination.clone(),
            timeout: settings.backend_timeout,
        }
    }
}
