use crate::adapter::openobserve::{OpenObserveClient, OpenObserveConfig};
use crate::config::Settings;
use crate::error::AdapterError;
use crate::port::LogBackend;
use std::sync::Arc;

/// Shared application state holding the backend client.
pub struct AppState {
    /// Concrete client, used for the startup health probe.
    pub client: Arc<OpenObserveClient>,
    pub backend: Arc<dyn LogBackend>,
}

impl AppState {
    /// Create `AppState` from configuration settings.
    ///
    /// The HTTP client is built here once and shared read-only by every
    /// request for the lifetime of the process.
    pub fn from_settings(settings: &Settings) -> Result<Self, AdapterError> {
        let client = OpenObserveClient::new(OpenObserveConfig::from_settings(settings))
            .map_err(AdapterError::Client)?;
        let client = Arc::new(client);
        let backend: Arc<dyn LogBackend> = client.clone();

        Ok(Self { client, backend })
    }
}
