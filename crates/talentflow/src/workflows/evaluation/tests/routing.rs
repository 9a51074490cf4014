use super::common::*;
use crate::workflows::evaluation::router::evaluation_router;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use serde_json::{json, Value};
use tower::ServiceExt;

fn build_router() -> axum::Router {
    let (service, _) = build_service();
    evaluation_router(service)
}

async fn read_json_body(response: Response) -> Value {
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

fn post_evaluation(draft: &crate::workflows::evaluation::domain::EvaluationDraft) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/evaluations")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(draft).expect("serialize")))
        .expect("request")
}

#[tokio::test]
async fn post_evaluation_returns_created_with_computed_scores() {
    let router = build_router();
    let response = router
        .oneshot(post_evaluation(&finance_draft(7)))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("final_score").and_then(Value::as_f64), Some(4.0));
    assert_eq!(
        payload.get("grade").and_then(Value::as_str),
        Some("Good/Meet Expectation"),
    );
    assert_eq!(payload.get("item_count").and_then(Value::as_u64), Some(6));
}

#[tokio::test]
async fn post_duplicate_evaluation_returns_conflict() {
    let router = build_router();
    let first = router
        .clone()
        .oneshot(post_evaluation(&finance_draft(7)))
        .await
        .expect("dispatch");
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = router
        .oneshot(post_evaluation(&finance_draft(7)))
        .await
        .expect("dispatch");
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn post_invalid_month_returns_unprocessable() {
    let router = build_router();
    let response = router
        .oneshot(post_evaluation(&finance_draft(13)))
        .await
        .expect("dispatch");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn put_amend_is_role_gated() {
    let router = build_router();
    router
        .clone()
        .oneshot(post_evaluation(&finance_draft(7)))
        .await
        .expect("dispatch");

    let amend = |role: &str| {
        let body = json!({
            "role": role,
            "appraiser": appraiser(),
            "items": [
                behavioral_item("beh-discipline", 2),
                behavioral_item("beh-integrity", 2),
                technical_item("fin-audit-trail", 30, 2),
            ],
        });
        Request::builder()
            .method("PUT")
            .uri("/api/v1/evaluations/emp-2107/2025/7")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).expect("serialize")))
            .expect("request")
    };

    let refused = router
        .clone()
        .oneshot(amend("Appraiser"))
        .await
        .expect("dispatch");
    assert_eq!(refused.status(), StatusCode::FORBIDDEN);

    let accepted = router.oneshot(amend("Manager")).await.expect("dispatch");
    assert_eq!(accepted.status(), StatusCode::OK);
    let payload = read_json_body(accepted).await;
    assert_eq!(payload.get("item_count").and_then(Value::as_u64), Some(3));
}

#[tokio::test]
async fn delete_reads_the_role_from_the_query() {
    let router = build_router();
    router
        .clone()
        .oneshot(post_evaluation(&finance_draft(7)))
        .await
        .expect("dispatch");

    let delete = |role: &str| {
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/v1/evaluations/emp-2107/2025/7?role={role}"))
            .body(Body::empty())
            .expect("request")
    };

    let refused = router
        .clone()
        .oneshot(delete("Employee"))
        .await
        .expect("dispatch");
    assert_eq!(refused.status(), StatusCode::FORBIDDEN);

    let accepted = router
        .clone()
        .oneshot(delete("Admin"))
        .await
        .expect("dispatch");
    assert_eq!(accepted.status(), StatusCode::NO_CONTENT);

    let missing = router.oneshot(delete("Admin")).await.expect("dispatch");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_detail_returns_the_stored_items() {
    let router = build_router();
    router
        .clone()
        .oneshot(post_evaluation(&finance_draft(7)))
        .await
        .expect("dispatch");

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/evaluations/emp-2107/2025/7")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("dispatch");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload
            .get("items")
            .and_then(Value::as_array)
            .map(Vec::len),
        Some(6),
    );
    assert_eq!(
        payload.pointer("/summary/final_score").and_then(Value::as_f64),
        Some(4.0),
    );

    let missing = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/evaluations/emp-2107/2025/8")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("dispatch");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_history_reports_the_annual_average() {
    let router = build_router();
    for month in [3, 9] {
        let response = router
            .clone()
            .oneshot(post_evaluation(&finance_draft(month)))
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/evaluations/emp-2107/2025")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("annual_average").and_then(Value::as_f64),
        Some(4.0),
    );
    let months: Vec<u64> = payload
        .get("evaluations")
        .and_then(Value::as_array)
        .expect("evaluations array")
        .iter()
        .map(|entry| entry.get("month").and_then(Value::as_u64).expect("month"))
        .collect();
    assert_eq!(months, vec![3, 9]);
}

#[tokio::test]
async fn get_metadata_lists_applicable_criteria() {
    let router = build_router();
    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(
                    "/api/v1/evaluations/emp-2107/metadata?department=finance&position=Finance%20SPV",
                )
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload
            .get("behavioral")
            .and_then(Value::as_array)
            .map(Vec::len),
        Some(5),
    );
    assert_eq!(
        payload
            .get("technical")
            .and_then(Value::as_array)
            .map(Vec::len),
        Some(3),
    );
}
