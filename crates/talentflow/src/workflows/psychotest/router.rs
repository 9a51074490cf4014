use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::catalog::CategoryCatalog;
use super::domain::{AnswerSheet, ApplicantId, AssessmentCategory, CategoryId, Question};
use super::repository::ResultStore;
use super::service::{AssessmentService, AssessmentServiceError};
use super::session::TestSession;

/// Router state: the stateless service plus the caller-held countdown
/// sessions, keyed by `(applicant, category)`. Holding the sessions here —
/// not in the engine — is what keeps every engine operation stateless
/// between invocations.
pub struct AssessmentRouterState<C, R> {
    service: Arc<AssessmentService<C, R>>,
    sessions: Arc<Mutex<HashMap<(ApplicantId, CategoryId), TestSession>>>,
}

impl<C, R> Clone for AssessmentRouterState<C, R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            sessions: self.sessions.clone(),
        }
    }
}

/// Router builder exposing the applicant test flow over HTTP.
pub fn assessment_router<C, R>(service: Arc<AssessmentService<C, R>>) -> Router
where
    C: CategoryCatalog + 'static,
    R: ResultStore + 'static,
{
    let state = AssessmentRouterState {
        service,
        sessions: Arc::new(Mutex::new(HashMap::new())),
    };
    Router::new()
        .route(
            "/api/v1/assessments/:applicant/next",
            get(next_handler::<C, R>),
        )
        .route(
            "/api/v1/assessments/:applicant/progress",
            get(progress_handler::<C, R>),
        )
        .route(
            "/api/v1/assessments/:applicant/categories/:category/open",
            post(open_handler::<C, R>),
        )
        .route(
            "/api/v1/assessments/:applicant/categories/:category/submissions",
            post(submit_handler::<C, R>),
        )
        .with_state(state)
}

/// Category header without its questions, for routing decisions.
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub id: CategoryId,
    pub name: String,
    pub order: u32,
    pub time_limit_seconds: u32,
    pub question_count: usize,
}

impl CategorySummary {
    pub fn from_category(category: &AssessmentCategory) -> Self {
        Self {
            id: category.id.clone(),
            name: category.name.clone(),
            order: category.order,
            time_limit_seconds: category.time_limit_seconds,
            question_count: category.questions.len(),
        }
    }
}

/// Full category payload served when an attempt opens.
#[derive(Debug, Clone, Serialize)]
pub struct OpenSessionView {
    pub category: CategorySummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub questions: Vec<Question>,
    /// Advisory countdown for the client; the server keeps its own clock.
    pub remaining_seconds: i64,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SubmissionPayload {
    #[serde(default)]
    answers: AnswerSheet,
}

pub(crate) async fn next_handler<C, R>(
    State(state): State<AssessmentRouterState<C, R>>,
    Path(applicant): Path<String>,
) -> Response
where
    C: CategoryCatalog + 'static,
    R: ResultStore + 'static,
{
    match state.service.next_category(&ApplicantId(applicant)) {
        Ok(Some(category)) => {
            let payload = json!({
                "status": "category",
                "category": CategorySummary::from_category(&category),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Ok(None) => {
            let payload = json!({ "status": "finished" });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn progress_handler<C, R>(
    State(state): State<AssessmentRouterState<C, R>>,
    Path(applicant): Path<String>,
) -> Response
where
    C: CategoryCatalog + 'static,
    R: ResultStore + 'static,
{
    match state.service.progress(&ApplicantId(applicant)) {
        Ok(progress) => {
            let payload = json!({
                "completed": progress.completed,
                "total": progress.total,
                "finished": progress.is_finished(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn open_handler<C, R>(
    State(state): State<AssessmentRouterState<C, R>>,
    Path((applicant, category)): Path<(String, String)>,
) -> Response
where
    C: CategoryCatalog + 'static,
    R: ResultStore + 'static,
{
    let applicant = ApplicantId(applicant);
    let category_id = CategoryId(category);
    let now = Utc::now();
    let key = (applicant.clone(), category_id.clone());

    match state
        .service
        .open_category(applicant.clone(), &category_id, now)
    {
        Ok(fresh) => {
            let mut sessions = state.sessions.lock().expect("session mutex poisoned");
            // Re-opening an in-flight attempt reuses its original clock.
            let session = sessions.entry(key).or_insert(fresh);
            let view = OpenSessionView {
                category: CategorySummary::from_category(session.category()),
                description: session.category().description.clone(),
                questions: session.category().questions.clone(),
                remaining_seconds: session.remaining_seconds(now),
            };
            (StatusCode::OK, axum::Json(json!({ "status": "ready", "session": view })))
                .into_response()
        }
        Err(AssessmentServiceError::AlreadyCompleted(_)) => {
            state
                .sessions
                .lock()
                .expect("session mutex poisoned")
                .remove(&key);
            redirect_response(&state, &applicant)
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<C, R>(
    State(state): State<AssessmentRouterState<C, R>>,
    Path((applicant, category)): Path<(String, String)>,
    axum::Json(payload): axum::Json<SubmissionPayload>,
) -> Response
where
    C: CategoryCatalog + 'static,
    R: ResultStore + 'static,
{
    let applicant = ApplicantId(applicant);
    let category_id = CategoryId(category);
    let now = Utc::now();
    let key = (applicant.clone(), category_id.clone());

    let taken = state
        .sessions
        .lock()
        .expect("session mutex poisoned")
        .remove(&key);

    let mut session = match taken {
        Some(session) => session,
        None => match state
            .service
            .open_category(applicant.clone(), &category_id, now)
        {
            Ok(session) => session,
            Err(AssessmentServiceError::AlreadyCompleted(_)) => {
                // The result is already on file; the late answers are
                // discarded and the applicant is routed onward as usual.
                return redirect_response(&state, &applicant);
            }
            Err(error) => return error_response(error),
        },
    };

    for (question, answer) in payload.answers.0 {
        if let Err(error) = session.record_answer(question, answer) {
            // Keep the attempt (and its clock) alive for a corrected retry.
            state
                .sessions
                .lock()
                .expect("session mutex poisoned")
                .insert(key, session);
            let body = json!({ "error": error.to_string() });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response();
        }
    }

    let attempt = session.finalize(now);
    match state.service.submit(attempt) {
        Ok(outcome) => {
            let payload = match &outcome.next {
                Some(next) => json!({
                    "created": outcome.created,
                    "status": "continue",
                    "next": CategorySummary::from_category(next),
                }),
                None => json!({
                    "created": outcome.created,
                    "status": "finished",
                    "next": serde_json::Value::Null,
                }),
            };
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

/// Response used when a category already has a result: indistinguishable
/// from a fresh successful submission, so replays and back-navigation just
/// keep the applicant moving.
fn redirect_response<C, R>(
    state: &AssessmentRouterState<C, R>,
    applicant: &ApplicantId,
) -> Response
where
    C: CategoryCatalog + 'static,
    R: ResultStore + 'static,
{
    match state.service.next_category(applicant) {
        Ok(Some(next)) => {
            let payload = json!({
                "created": false,
                "status": "continue",
                "next": CategorySummary::from_category(&next),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Ok(None) => {
            let payload = json!({
                "created": false,
                "status": "finished",
                "next": serde_json::Value::Null,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: AssessmentServiceError) -> Response {
    let status = match &error {
        AssessmentServiceError::CategoryNotFound(_) => StatusCode::NOT_FOUND,
        AssessmentServiceError::AlreadyCompleted(_) => StatusCode::CONFLICT,
        AssessmentServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
