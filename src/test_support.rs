//! Shared test support utilities
//!
//! Provides an in-memory `MockBackend` implementing `LogBackend` for the
//! alert handler unit tests.

use crate::domain::{AlertDefinition, ComponentLogsParams, LogQueryResult};
use crate::error::BackendError;
use crate::port::{BackendFuture, LogBackend};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Mock backend holding a list of alerts and recording deletions.
pub struct MockBackend {
    alerts: Mutex<Vec<(String, String)>>,
    deleted_ids: Mutex<Vec<String>>,
    should_fail: AtomicBool,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            alerts: Mutex::new(Vec::new()),
            deleted_ids: Mutex::new(Vec::new()),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    /// Registers an existing backend alert.
    pub fn add_alert(&self, alert_id: &str, name: &str) {
        self.alerts
            .lock()
            .unwrap()
            .push((alert_id.to_string(), name.to_string()));
    }

    pub fn deleted_ids(&self) -> Vec<String> {
        self.deleted_ids.lock().unwrap().clone()
    }

    fn failure(&self) -> Result<(), BackendError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(BackendError::Status {
                status: 502,
                body: "Mock backend failure".to_string(),
            });
        }
        Ok(())
    }
}

impl LogBackend for MockBackend {
    fn get_component_logs(&self, _: ComponentLogsParams) -> BackendFuture<'_, LogQueryResult> {
        Box::pin(async move {
            self.failure()?;
            Ok(LogQueryResult::default())
        })
    }

    fn create_alert(&self, _: AlertDefinition) -> BackendFuture<'_, ()> {
        Box::pin(async move { self.failure() })
    }
    fn resolve_alert_id<'a>(&'a self, name: &'a str) -> BackendFuture<'a, String> {
        Box::pin(async move {
            self.failure()?;
            self.alerts
                .lock()
                .unwrap()
                .iter()
                .find(|(_, alert_name)| alert_name == name)
                .map(|(alert_id, _)| alert_id.clone())
                .ok_or_else(|| BackendError::AlertNotFound(name.to_string()))
        })
    }

    fn delete_alert_by_id<'a>(&'a self, alert_id: &'a str) -> BackendFuture<'a, ()> {
        Box::pin(async move {
            self.failure()?;
            self.alerts
                .lock()
                .unwrap()
                .retain(|(existing, _)| existing != alert_id);
            self.deleted_ids.lock().unwrap().push(alert_id.to_string());
            Ok(())
        })
    }
}
