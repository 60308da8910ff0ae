use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{LeadKey, LeadSubmission, OutcomeStatus, DEFAULT_EXTERNAL_SOURCE};
use super::repository::LeadRepository;
use super::service::{LeadScoringService, LeadServiceError};

/// Wire error codes; every failure mode the endpoints can produce maps to
/// exactly one of these plus an HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidApiKey,
    MissingExternalId,
    LeadNotFound,
    BatchTooLarge,
    InvalidRequest,
    InternalError,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidApiKey => "INVALID_API_KEY",
            ErrorCode::MissingExternalId => "MISSING_EXTERNAL_ID",
            ErrorCode::LeadNotFound => "LEAD_NOT_FOUND",
            ErrorCode::BatchTooLarge => "BATCH_TOO_LARGE",
            ErrorCode::InvalidRequest => "INVALID_REQUEST",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }

    pub const fn status(self) -> StatusCode {
        match self {
            ErrorCode::InvalidApiKey => StatusCode::UNAUTHORIZED,
            ErrorCode::LeadNotFound => StatusCode::NOT_FOUND,
            ErrorCode::MissingExternalId | ErrorCode::BatchTooLarge | ErrorCode::InvalidRequest => {
                StatusCode::BAD_REQUEST
            }
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Router builder exposing the scoring endpoints over a shared service.
pub fn lead_router<R>(service: Arc<LeadScoringService<R>>) -> Router
where
    R: LeadRepository + 'static,
{
    Router::new()
        .route("/api/v1/leads/score", post(score_handler::<R>))
        .route("/api/v1/leads/score/batch", post(batch_handler::<R>))
        .route("/api/v1/leads/:external_id", get(get_handler::<R>))
        .route(
            "/api/v1/leads/:external_id/outcome",
            post(outcome_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct SourceQuery {
    source: Option<String>,
}

impl SourceQuery {
    fn key(&self, external_id: String) -> LeadKey {
        LeadKey::new(
            external_id,
            self.source
                .clone()
                .unwrap_or_else(|| DEFAULT_EXTERNAL_SOURCE.to_string()),
        )
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct OutcomeRequest {
    pub(crate) outcome: OutcomeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) occurred_at: Option<DateTime<Utc>>,
}

pub(crate) async fn score_handler<R>(
    State(service): State<Arc<LeadScoringService<R>>>,
    headers: HeaderMap,
    payload: Result<Json<LeadSubmission>, JsonRejection>,
) -> Response
where
    R: LeadRepository + 'static,
{
    if let Err(response) = check_api_key(&service, &headers) {
        return response;
    }

    let Json(submission) = match payload {
        Ok(json) => json,
        Err(rejection) => return invalid_request(rejection),
    };

    match service.score(submission) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(error) => service_error(error),
    }
}

pub(crate) async fn batch_handler<R>(
    State(service): State<Arc<LeadScoringService<R>>>,
    headers: HeaderMap,
    payload: Result<Json<Vec<LeadSubmission>>, JsonRejection>,
) -> Response
where
    R: LeadRepository + 'static,
{
    if let Err(response) = check_api_key(&service, &headers) {
        return response;
    }

    let Json(submissions) = match payload {
        Ok(json) => json,
        Err(rejection) => return invalid_request(rejection),
    };

    match service.score_batch(submissions) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(error) => service_error(error),
    }
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<LeadScoringService<R>>>,
    headers: HeaderMap,
    Path(external_id): Path<String>,
    Query(query): Query<SourceQuery>,
) -> Response
where
    R: LeadRepository + 'static,
{
    if let Err(response) = check_api_key(&service, &headers) {
        return response;
    }

    match service.get(&query.key(external_id)) {
        Ok(record) => (StatusCode::OK, Json(record.response_view())).into_response(),
        Err(error) => service_error(error),
    }
}

pub(crate) async fn outcome_handler<R>(
    State(service): State<Arc<LeadScoringService<R>>>,
    headers: HeaderMap,
    Path(external_id): Path<String>,
    Query(query): Query<SourceQuery>,
    payload: Result<Json<OutcomeRequest>, JsonRejection>,
) -> Response
where
    R: LeadRepository + 'static,
{
    if let Err(response) = check_api_key(&service, &headers) {
        return response;
    }

    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return invalid_request(rejection),
    };

    let key = query.key(external_id);
    match service.record_outcome(&key, request.outcome, request.occurred_at) {
        Ok(record) => {
            let outcome = record.outcome.expect("outcome just recorded");
            let body = json!({
                "external_id": key.external_id,
                "external_source": key.external_source,
                "outcome": outcome.status.label(),
                "days_to_outcome": outcome.days_to_outcome,
            });
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => service_error(error),
    }
}

fn check_api_key<R>(
    service: &LeadScoringService<R>,
    headers: &HeaderMap,
) -> Result<(), Response>
where
    R: LeadRepository + 'static,
{
    let presented = headers.get("x-api-key").and_then(|value| value.to_str().ok());
    service.authorize(presented).map_err(service_error)
}

fn service_error(error: LeadServiceError) -> Response {
    let code = match error {
        LeadServiceError::InvalidApiKey => ErrorCode::InvalidApiKey,
        LeadServiceError::MissingExternalId => ErrorCode::MissingExternalId,
        LeadServiceError::BatchTooLarge { .. } => ErrorCode::BatchTooLarge,
        LeadServiceError::NotFound => ErrorCode::LeadNotFound,
        LeadServiceError::Repository(_) => ErrorCode::InternalError,
    };
    error_response(code, error.to_string())
}

fn invalid_request(rejection: JsonRejection) -> Response {
    error_response(ErrorCode::InvalidRequest, rejection.body_text())
}

fn error_response(code: ErrorCode, message: String) -> Response {
    let body = json!({
        "error": {
            "code": code.as_str(),
            "message": message,
        }
    });
    (code.status(), Json(body)).into_response()
}
