use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::catalog::CriterionCatalog;
use super::domain::{
    DepartmentId, EmployeeId, EmployeeProfile, EvaluationDraft, EvaluationPeriod, ItemDraft, Role,
};
use super::repository::{Evaluation, EvaluationRepository};
use super::service::{EvaluationService, EvaluationServiceError};

/// Router builder exposing the evaluation lifecycle over HTTP.
pub fn evaluation_router<C, R>(service: Arc<EvaluationService<C, R>>) -> Router
where
    C: CriterionCatalog + 'static,
    R: EvaluationRepository + 'static,
{
    Router::new()
        .route("/api/v1/evaluations", post(record_handler::<C, R>))
        .route(
            "/api/v1/evaluations/:employee/metadata",
            get(metadata_handler::<C, R>),
        )
        .route(
            "/api/v1/evaluations/:employee/:year",
            get(history_handler::<C, R>),
        )
        .route(
            "/api/v1/evaluations/:employee/:year/:month",
            get(detail_handler::<C, R>)
                .put(amend_handler::<C, R>)
                .delete(delete_handler::<C, R>),
        )
        .with_state(service)
}

/// Sanitized summary of a stored evaluation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationView {
    pub employee: EmployeeId,
    pub appraiser: EmployeeId,
    pub month: u8,
    pub year: i32,
    pub behavior_score: f64,
    pub technical_score: f64,
    pub final_score: f64,
    pub grade: &'static str,
    pub item_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl EvaluationView {
    pub fn from_evaluation(evaluation: &Evaluation) -> Self {
        Self {
            employee: evaluation.employee.clone(),
            appraiser: evaluation.appraiser.clone(),
            month: evaluation.period.month,
            year: evaluation.period.year,
            behavior_score: evaluation.scorecard.behavior_score,
            technical_score: evaluation.scorecard.technical_score,
            final_score: evaluation.scorecard.final_score,
            grade: evaluation.scorecard.grade.label(),
            item_count: evaluation.items.len(),
            feedback: evaluation.feedback.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MetadataQuery {
    department: Option<String>,
    position: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AmendPayload {
    role: Role,
    appraiser: EmployeeId,
    items: Vec<ItemDraft>,
    #[serde(default)]
    feedback: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RoleQuery {
    role: Role,
}

pub(crate) async fn record_handler<C, R>(
    State(service): State<Arc<EvaluationService<C, R>>>,
    axum::Json(draft): axum::Json<EvaluationDraft>,
) -> Response
where
    C: CriterionCatalog + 'static,
    R: EvaluationRepository + 'static,
{
    match service.record(draft) {
        Ok(evaluation) => {
            let view = EvaluationView::from_evaluation(&evaluation);
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn metadata_handler<C, R>(
    State(service): State<Arc<EvaluationService<C, R>>>,
    Path(employee): Path<String>,
    Query(query): Query<MetadataQuery>,
) -> Response
where
    C: CriterionCatalog + 'static,
    R: EvaluationRepository + 'static,
{
    let profile = EmployeeProfile {
        employee: EmployeeId(employee),
        department: query.department.map(DepartmentId),
        position: query.position,
    };
    let metadata = service.metadata(&profile);
    (StatusCode::OK, axum::Json(metadata)).into_response()
}

pub(crate) async fn history_handler<C, R>(
    State(service): State<Arc<EvaluationService<C, R>>>,
    Path((employee, year)): Path<(String, i32)>,
) -> Response
where
    C: CriterionCatalog + 'static,
    R: EvaluationRepository + 'static,
{
    match service.history(&EmployeeId(employee), year) {
        Ok(history) => {
            let evaluations: Vec<EvaluationView> = history
                .evaluations
                .iter()
                .map(EvaluationView::from_evaluation)
                .collect();
            let payload = json!({
                "year": year,
                "annual_average": history.annual_average,
                "evaluations": evaluations,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn detail_handler<C, R>(
    State(service): State<Arc<EvaluationService<C, R>>>,
    Path((employee, year, month)): Path<(String, i32, u8)>,
) -> Response
where
    C: CriterionCatalog + 'static,
    R: EvaluationRepository + 'static,
{
    let period = EvaluationPeriod { month, year };
    match service.find(&EmployeeId(employee), period) {
        Ok(Some(evaluation)) => {
            let payload = json!({
                "summary": EvaluationView::from_evaluation(&evaluation),
                "items": evaluation.items,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Ok(None) => error_response(EvaluationServiceError::NotRecorded),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn amend_handler<C, R>(
    State(service): State<Arc<EvaluationService<C, R>>>,
    Path((employee, year, month)): Path<(String, i32, u8)>,
    axum::Json(payload): axum::Json<AmendPayload>,
) -> Response
where
    C: CriterionCatalog + 'static,
    R: EvaluationRepository + 'static,
{
    let draft = EvaluationDraft {
        employee: EmployeeId(employee),
        appraiser: payload.appraiser,
        period: EvaluationPeriod { month, year },
        items: payload.items,
        feedback: payload.feedback,
    };
    match service.amend(payload.role, draft) {
        Ok(evaluation) => {
            let view = EvaluationView::from_evaluation(&evaluation);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<C, R>(
    State(service): State<Arc<EvaluationService<C, R>>>,
    Path((employee, year, month)): Path<(String, i32, u8)>,
    Query(query): Query<RoleQuery>,
) -> Response
where
    C: CriterionCatalog + 'static,
    R: EvaluationRepository + 'static,
{
    let period = EvaluationPeriod { month, year };
    match service.delete(query.role, &EmployeeId(employee), period) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: EvaluationServiceError) -> Response {
    let status = match &error {
        EvaluationServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EvaluationServiceError::Duplicate => StatusCode::CONFLICT,
        EvaluationServiceError::CriterionNotFound(_) | EvaluationServiceError::NotRecorded => {
            StatusCode::NOT_FOUND
        }
        EvaluationServiceError::InsufficientRole { .. } => StatusCode::FORBIDDEN,
        EvaluationServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
