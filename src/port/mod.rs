use crate::domain::{AlertDefinition, ComponentLogsParams, LogQueryResult};
use crate::error::BackendError;
use std::future::Future;
use std::pin::Pin;

pub type BackendFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, BackendError>> + Send + 'a>>;

/// Log search and alert store the HTTP handlers talk to.
///
/// This trait is dyn-compatible by using boxed futures instead of `impl Future`.
///
/// Alerts are addressed by name on this side but by an opaque backend ID on
/// the other, so deletion is exposed as two steps. [`LogBackend::delete_alert`]
/// composes them; it is not atomic, and a rename or delete between the two
/// requests is not detected.
pub trait LogBackend: Send + Sync {
    fn get_component_logs(&self, params: ComponentLogsParams) -> BackendFuture<'_, LogQueryResult>;

    fn create_alert(&self, alert: AlertDefinition) -> BackendFuture<'_, ()>;

    /// Returns the ID of the first listed alert named `name`, or
    /// [`BackendError::AlertNotFound`].
    fn resolve_alert_id<'a>(&'a self, name: &'a str) -> BackendFuture<'a, String>;

    fn delete_alert_by_id<'a>(&'a self, alert_id: &'a str) -> BackendFuture<'a, ()>;

    /// Resolves `name` and deletes the alert it maps to. No delete request is
    /// issued when resolution fails.
    fn delete_alert<'a>(&'a self, name: &'a str) -> BackendFuture<'a, ()> {
        Box::pin(async move {
            let alert_id = self.resolve_alert_id(name).await?;
            self.delete_alert_by_id(&alert_id).await
        })
    }
}
