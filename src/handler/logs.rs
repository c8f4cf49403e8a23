use crate::domain::{LogQuery, QueryDecodeError, SUPPORTED_QUERY_TYPES};
use crate::port::LogBackend;
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Handler for POST /api/v1/logs/query
///
/// The body is read once and decoded twice: first for the `type`
/// discriminator, then as the payload of that query type.
#[instrument(skip_all, fields(body_size = body.len()))]
pub async fn query_logs_handler(
    State(backend): State<Arc<dyn LogBackend>>,
    body: Bytes,
) -> Response {
    let query = match LogQuery::from_slice(&body) {
        Ok(query) => query,
        Err(e) => return decode_error_response(&e),
    };

    match query {
        LogQuery::Component(params) => match backend.get_component_logs(params).await {
            Ok(result) => {
                info!(
                    count = result.logs.len(),
                    total = result.total_count,
                    "Served component logs query"
                );
                (StatusCode::OK, Json(result)).into_response()
            }
            Err(e) => {
                error!(error = %e, "Failed to get component logs");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch component logs",
                )
                    .into_response()
            }
        },
    }
}

fn supported_types() -> String {
    SUPPORTED_QUERY_TYPES
        .iter()
        .map(|t| format!("\"{t}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

fn decode_error_response(e: &QueryDecodeError) -> Response {
    let message = match e {
        QueryDecodeError::Body(source) => {
            error!(error = %source, "Failed to decode request body");
            "Invalid request body".to_string()
        }
        QueryDecodeError::UnknownType(kind) => {
            error!(query_type = %kind, "Unknown log query type");
            format!(
                "Unknown log query type: {kind}. Supported types are {}",
                supported_types()
            )
        }
        QueryDecodeError::Payload { kind, source } => {
            error!(query_type = kind, error = %source, "Failed to decode log query params");
            format!("Invalid {kind} logs params")
        }
        QueryDecodeError::Invalid { kind, reason } => {
            error!(query_type = kind, reason = %reason, "Rejected log query params");
            format!("Invalid {kind} logs params: {reason}")
        }
    };
    (StatusCode::BAD_REQUEST, message).into_response()
}
