use std::sync::Arc;

use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;

use crate::advisor::{AssessmentError, AssessmentOrchestrator, AssessmentRequest, AssessmentResult};

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<AssessmentOrchestrator>,
}

impl AppState {
    pub fn new(orchestrator: AssessmentOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }
}

/// Error body: `{"detail": "..."}`
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    status: StatusCode,
    detail: String,
}

impl From<AssessmentError> for ApiError {
    fn from(err: AssessmentError) -> Self {
        Self {
            status: StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            detail: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/assess", post(assess))
        .route("/health", get(health))
        .with_state(state)
}

async fn assess(
    State(state): State<AppState>,
    payload: Result<Json<AssessmentRequest>, JsonRejection>,
) -> Result<Json<AssessmentResult>, ApiError> {
    let Json(request) = payload?;
    let report = request
        .into_report()
        .map_err(AssessmentError::InvalidRequest)?;

    let result = state.orchestrator.assess(report).await?;
    Ok(Json(result))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
