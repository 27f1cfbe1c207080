use super::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use batseq_core::{BatseqError, ResultTable};
use batseq_tools::ServiceStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct BlastnRequest {
    #[serde(default)]
    pub sequence: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    #[serde(flatten)]
    pub service: ServiceStatus,
}

/// Error body `{"error": ...}` with the matching status code
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<BatseqError> for ApiError {
    fn from(err: BatseqError) -> Self {
        if err.is_client_error() {
            let message = match err {
                BatseqError::InvalidInput(msg) => msg,
                other => other.to_string(),
            };
            return Self {
                status: StatusCode::BAD_REQUEST,
                message,
            };
        }

        tracing::error!(kind = err.kind(), "Search failed: {}", err);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// POST /api/blastn
pub async fn blastn(
    State(service): State<AppState>,
    payload: Result<Json<BlastnRequest>, JsonRejection>,
) -> Result<Json<ResultTable>, ApiError> {
    let Json(request) = payload?;
    let sequence = request.sequence.unwrap_or_default();
    let results = service.search(&sequence).await?;
    Ok(Json(results))
}

/// GET /api/health
pub async fn health(State(service): State<AppState>) -> Json<HealthResponse> {
    let status = service.status().await;
    Json(HealthResponse {
        status: if status.ready() { "ok" } else { "degraded" },
        timestamp: chrono::Utc::now().to_rfc3339(),
        service: status,
    })
}
