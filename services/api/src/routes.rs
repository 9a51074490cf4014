use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use talentflow::workflows::evaluation::{
    evaluation_router, CriterionCatalog, EvaluationRepository, EvaluationService,
};
use talentflow::workflows::psychotest::{
    assessment_router, AssessmentService, CategoryCatalog, ResultStore,
};

/// Mount both engine routers plus the operational endpoints.
pub(crate) fn with_engine_routes<EC, ER, AC, AR>(
    evaluations: Arc<EvaluationService<EC, ER>>,
    assessments: Arc<AssessmentService<AC, AR>>,
) -> axum::Router
where
    EC: CriterionCatalog + 'static,
    ER: EvaluationRepository + 'static,
    AC: CategoryCatalog + 'static,
    AR: ResultStore + 'static,
{
    evaluation_router(evaluations)
        .merge(assessment_router(assessments))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
