use super::MessageResponse;
use crate::domain::AlertDefinition;
use crate::port::LogBackend;
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

const RULE_NAME_REQUIRED: &str = "Rule name is required";

fn rule_name_required() -> Response {
    error!("Rule name is required");
    (StatusCode::BAD_REQUEST, RULE_NAME_REQUIRED).into_response()
}

/// Handler for POST/DELETE /api/v1/alerts/rules without a rule name.
pub async fn missing_rule_name_handler() -> Response {
    rule_name_required()
}

/// Handler for POST /api/v1/alerts/rules/{ruleName}
///
/// The rule name from the path replaces any `name` in the body.
#[instrument(skip(backend, body))]
pub async fn create_alert_handler(
    Path(rule_name): Path<String>,
    State(backend): State<Arc<dyn LogBackend>>,
    body: Bytes,
) -> Response {
    if rule_name.trim().is_empty() {
        return rule_name_required();
    }

    let alert = match serde_json::from_slice::<AlertDefinition>(&body) {
        Ok(alert) => alert.named(rule_name),
        Err(e) => {
            error!(error = %e, "Failed to decode request body");
            return (StatusCode::BAD_REQUEST, "Invalid request body").into_response();
        }
    };

    match backend.create_alert(alert).await {
        Ok(()) => {
            info!("Alert rule created");
            (
                StatusCode::CREATED,
                Json(MessageResponse {
                    message: "Alert created successfully",
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create alert");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create alert").into_response()
        }
    }
}

/// Handler for DELETE /api/v1/alerts/rules/{ruleName}
///
/// An unknown rule name answers 500 like any other backend failure; the log
/// line tells the two apart.
#[instrument(skip(backend))]
pub async fn delete_alert_handler(
    Path(rule_name): Path<String>,
    State(backend): State<Arc<dyn LogBackend>>,
) -> Response {
    if rule_name.trim().is_empty() {
        return rule_name_required();
    }

    match backend.delete_alert(&rule_name).await {
        Ok(()) => {
            info!("Alert rule deleted");
            (
                StatusCode::OK,
                Json(MessageResponse {
                    message: "Alert deleted successfully",
                }),
            )
                .into_response()
        }
        Err(e) if e.is_not_found() => {
            warn!(error = %e, "Alert rule not found, nothing deleted");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete alert").into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to delete alert");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete alert").into_response()
        }
    }
}
