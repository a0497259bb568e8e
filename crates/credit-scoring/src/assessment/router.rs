use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::json;

use super::classifier::{ClassifierError, CreditVerdict};
use super::domain::ApplicantRecord;
use super::journal::DecisionJournal;
use super::scoring::{ScoreBreakdown, ScoreComponent};
use super::service::{AssessmentServiceError, CreditAssessmentService};

/// Rule-based assessment returned to API callers.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentView {
    pub approved: bool,
    pub score: f64,
    pub score_scale: f64,
    pub max_monthly_commitment: f64,
    pub components: Vec<ScoreComponent>,
}

impl AssessmentView {
    pub fn new(breakdown: ScoreBreakdown, score_scale: f64) -> Self {
        Self {
            approved: breakdown.result.approved,
            score: breakdown.result.score,
            score_scale,
            max_monthly_commitment: breakdown.result.max_monthly_commitment,
            components: breakdown.components,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VerdictView {
    pub verdict: CreditVerdict,
    pub approved: bool,
}

/// Router builder exposing HTTP endpoints for assessments and statistics.
pub fn assessment_router<J>(service: Arc<CreditAssessmentService<J>>) -> Router
where
    J: DecisionJournal + 'static,
{
    Router::new()
        .route("/api/v1/credit/assessments", post(assess_handler::<J>))
        .route("/api/v1/credit/classifier", post(classify_handler::<J>))
        .route("/api/v1/credit/statistics", get(statistics_handler::<J>))
        .with_state(service)
}

pub(crate) async fn assess_handler<J>(
    State(service): State<Arc<CreditAssessmentService<J>>>,
    payload: Result<axum::Json<ApplicantRecord>, JsonRejection>,
) -> Response
where
    J: DecisionJournal + 'static,
{
    let record = match payload {
        Ok(axum::Json(record)) => record,
        Err(rejection) => return rejection_response(rejection),
    };

    // Journal appends touch the filesystem; keep them off the async workers.
    let outcome = tokio::task::spawn_blocking({
        let service = service.clone();
        move || service.assess(record)
    })
    .await;

    match outcome {
        Ok(Ok(breakdown)) => {
            let view = AssessmentView::new(breakdown, service.scoring_config().display_scale);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Ok(Err(AssessmentServiceError::Eligibility(violation))) => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, violation)
        }
        Ok(Err(other)) => error_response(StatusCode::INTERNAL_SERVER_ERROR, other),
        Err(join_error) => error_response(StatusCode::INTERNAL_SERVER_ERROR, join_error),
    }
}

pub(crate) async fn classify_handler<J>(
    State(service): State<Arc<CreditAssessmentService<J>>>,
    payload: Result<axum::Json<ApplicantRecord>, JsonRejection>,
) -> Response
where
    J: DecisionJournal + 'static,
{
    let record = match payload {
        Ok(axum::Json(record)) => record,
        Err(rejection) => return rejection_response(rejection),
    };

    match service.classify(&record) {
        Ok(verdict) => {
            let view = VerdictView {
                verdict,
                approved: verdict.approved(),
            };
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(
            error @ (AssessmentServiceError::Eligibility(_)
            | AssessmentServiceError::Classifier(ClassifierError::MissingFeature(_))),
        ) => error_response(StatusCode::UNPROCESSABLE_ENTITY, error),
        Err(error @ AssessmentServiceError::ClassifierNotConfigured) => {
            error_response(StatusCode::SERVICE_UNAVAILABLE, error)
        }
        Err(other) => error_response(StatusCode::INTERNAL_SERVER_ERROR, other),
    }
}

pub(crate) async fn statistics_handler<J>(
    State(service): State<Arc<CreditAssessmentService<J>>>,
) -> Response
where
    J: DecisionJournal + 'static,
{
    match tokio::task::spawn_blocking(move || service.statistics()).await {
        Ok(Ok(statistics)) => (StatusCode::OK, axum::Json(statistics)).into_response(),
        Ok(Err(other)) => error_response(StatusCode::INTERNAL_SERVER_ERROR, other),
        Err(join_error) => error_response(StatusCode::INTERNAL_SERVER_ERROR, join_error),
    }
}

/// Body errors share the `{ "error": ... }` shape; unreadable or incomplete JSON is a 422.
fn rejection_response(rejection: JsonRejection) -> Response {
    let status = match &rejection {
        JsonRejection::JsonSyntaxError(_) | JsonRejection::JsonDataError(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        other => other.status(),
    };
    error_response(status, rejection.body_text())
}

fn error_response(status: StatusCode, error: impl std::fmt::Display) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
