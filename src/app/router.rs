use crate::handler::alerts::{
    create_alert_handler, delete_alert_handler, missing_rule_name_handler,
};
use crate::handler::health::health_handler;
use crate::handler::logs::query_logs_handler;
use crate::port::LogBackend;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;

/// Build the HTTP router (health + logs query + alert rules).
pub fn api_router(backend: Arc<dyn LogBackend>) -> Router {
    let health_router = Router::new().route("/health", get(health_handler));

    let api_router = Router::new()
        .route("/api/v1/logs/query", post(query_logs_handler))
        .route(
            "/api/v1/alerts/rules/{ruleName}",
            post(create_alert_handler).delete(delete_alert_handler),
        )
        // An empty path segment never reaches the named route.
        .route(
            "/api/v1/alerts/rules",
            post(missing_rule_name_handler).delete(missing_rule_name_handler),
        )
        .route(
            "/api/v1/alerts/rules/",
            post(missing_rule_name_handler).delete(missing_rule_name_handler),
        )
        .with_state(backend);

    Router::new().merge(health_router).merge(api_router)
}

/// Answers 408 for requests running longer than `timeout`; the handler and
/// its backend call are dropped.
pub fn with_request_timeout(router: Router, timeout: Duration) -> Router {
    router.layer(TimeoutLayer::new(timeout))
}
