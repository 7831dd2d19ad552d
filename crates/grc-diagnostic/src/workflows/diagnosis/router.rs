use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use serde_json::json;

use super::domain::ResponseError;
use super::service::{DiagnosisService, DiagnosisSubmission};

/// Router exposing the questionnaire, the scoring endpoint and the narrative
/// endpoint.
pub fn diagnosis_router(service: Arc<DiagnosisService>) -> Router {
    Router::new()
        .route("/api/v1/diagnosis/questionnaire", get(questionnaire_handler))
        .route("/api/v1/diagnosis", post(diagnose_handler))
        .route("/api/v1/diagnosis/narrative", post(narrative_handler))
        .with_state(service)
}

pub(crate) async fn questionnaire_handler(
    State(service): State<Arc<DiagnosisService>>,
) -> Response {
    (StatusCode::OK, axum::Json(service.questionnaire())).into_response()
}

pub(crate) async fn diagnose_handler(
    State(service): State<Arc<DiagnosisService>>,
    axum::Json(submission): axum::Json<DiagnosisSubmission>,
) -> Response {
    let issued_on = Local::now().date_naive();
    match service.diagnose(submission, issued_on).await {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => rejected(error),
    }
}

pub(crate) async fn narrative_handler(
    State(service): State<Arc<DiagnosisService>>,
    axum::Json(submission): axum::Json<DiagnosisSubmission>,
) -> Response {
    match service.narrate(submission).await {
        Ok(narrative) => (StatusCode::OK, axum::Json(narrative)).into_response(),
        Err(error) => rejected(error),
    }
}

fn rejected(error: ResponseError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}
