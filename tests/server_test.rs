use axum::http::StatusCode;
use axum::routing::get;
use axum_test::TestServer;
use logs_adapter::app::router::{api_router, with_request_timeout};
use logs_adapter::app::server::serve_on;
use logs_adapter::domain::{AlertDefinition, ComponentLogsParams, LogQueryResult};
use logs_adapter::error::BackendError;
use logs_adapter::port::{BackendFuture, LogBackend};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::{sleep, timeout};
use tokio_util::sync::CancellationToken;

/// Backend whose calls never complete.
struct HangingBackend;

fn never<T: 'static>() -> BackendFuture<'static, T> {
    Box::pin(std::future::pending::<Result<T, BackendError>>())
}

impl LogBackend for HangingBackend {
    fn get_component_logs(&self, _: ComponentLogsParams) -> BackendFuture<'_, LogQueryResult> {
        never()
    }

    fn create_alert(&self, _: AlertDefinition) -> BackendFuture<'_, ()> {
        never()
    }

    fn resolve_alert_id<'a>(&'a self, _: &'a str) -> BackendFuture<'a, String> {
        never()
    }

    fn delete_alert_by_id<'a>(&'a self, _: &'a str) -> BackendFuture<'a, ()> {
        never()
    }
}

fn hanging_router() -> axum::Router {
    axum::Router::new().route("/hang", get(|| std::future::pending::<&'static str>()))
}

#[tokio::test]
async fn test_shutdown_without_requests_returns_promptly() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let token = CancellationToken::new();

    let server = tokio::spawn(serve_on(
        listener,
        hanging_router(),
        token.clone(),
        Duration::from_secs(30),
    ));

    token.cancel();

    let result = timeout(Duration::from_secs(5), server)
        .await
        .expect("server should stop once cancelled");
    assert!(result.unwrap().is_ok());
}

#[tokio::test]
async fn test_shutdown_stops_waiting_for_stuck_requests_after_grace() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let token = CancellationToken::new();

    let server = tokio::spawn(serve_on(
        listener,
        hanging_router(),
        token.clone(),
        Duration::from_millis(200),
    ));

    let stuck = tokio::spawn(async move {
        reqwest::get(format!("http://127.0.0.1:{port}/hang")).await
    });
    sleep(Duration::from_millis(200)).await;

    token.cancel();

    let result = timeout(Duration::from_secs(5), server)
        .await
        .expect("stuck request must not hold shutdown past the grace period");
    assert!(result.unwrap().is_ok());

    stuck.abort();
}

#[tokio::test]
async fn test_request_timeout_answers_408_for_hung_backend() {
    let app = with_request_timeout(
        api_router(Arc::new(HangingBackend)),
        Duration::from_millis(100),
    );
    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/api/v1/logs/query")
        .json(&json!({
            "type": "component",
            "projectId": "p1",
            "environmentId": "e1",
            "startTime": "2024-01-01T00:00:00Z",
            "endTime": "2024-01-02T00:00:00Z"
        }))
        .await;

    response.assert_status(StatusCode::REQUEST_TIMEOUT);
}

#[tokio::test]
async fn test_request_timeout_leaves_fast_routes_alone() {
    let app = with_request_timeout(
        api_router(Arc::new(HangingBackend)),
        Duration::from_millis(100),
    );
    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_text("Healthy");
}
