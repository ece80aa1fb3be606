use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use woop_core::{generate_report, RagflowClient, ReportRequest, ServiceError};

// Shared by every handler; the client owns the backend configuration.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<RagflowClient>,
}

// Output: error body for every failure
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Failure carried back to the HTTP caller as `{ "message": ... }`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if err.is_client_error() {
            warn!("Request rejected ({}): {}", status.as_u16(), err);
        } else {
            error!("Unhandled error: {:?}", err);
        }

        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Malformed request body: {}", rejection.body_text());
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { message: self.message })).into_response()
    }
}

// --- HANDLERS ---

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// POST /api/ragflow/query: forward the body verbatim.
pub async fn run_query(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(payload) = payload?;
    let response = state.client.run_query(&payload).await?;
    Ok(Json(response))
}

/// GET /api/ragflow/datasets
pub async fn list_datasets(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let response = state.client.list_datasets().await?;
    Ok(Json(response))
}

/// POST /api/ragflow/woop: build the WOOP prompt and return the backend reply.
pub async fn generate_woop(
    State(state): State<AppState>,
    request: Result<Json<ReportRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = request?;
    info!("WOOP report requested");
    let response = generate_report(&state.client, &request).await?;
    Ok(Json(response))
}

pub async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            message: "Resource not found".to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_keep_their_status_and_message() {
        let err = ApiError::from(ServiceError::validation("goals is required."));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "goals is required.");

        let err = ApiError::from(ServiceError::not_configured(501, "RAGFLOW_DATASETS_PATH is not configured."));
        assert_eq!(err.status(), StatusCode::NOT_IMPLEMENTED);

        let err = ApiError::from(ServiceError::Unreachable);
        assert_eq!(err.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn out_of_range_upstream_status_becomes_500() {
        let err = ApiError::from(ServiceError::Upstream {
            status: 42,
            message: "odd".into(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
