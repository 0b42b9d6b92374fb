//! HTTP API tests driving the axum router in-process

mod common;

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use common::{ScriptedLlm, ScriptedSearch, planner};
use travelplanner::config::ServerConfig;
use travelplanner::pipeline::TravelResponse;
use travelplanner::server::create_router;

fn router(llm: ScriptedLlm, search: ScriptedSearch) -> axum::Router {
    let (planner, _) = planner(Arc::new(llm), Arc::new(search));
    create_router(Arc::new(planner), &ServerConfig::default())
}

fn plan_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/plan")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = router(ScriptedLlm::ok(&[]), ScriptedSearch::new());

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, serde_json::json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_plan_success() {
    let app = router(
        ScriptedLlm::ok(&["Outline", "q1\nq2", "Day 1: museum"]),
        ScriptedSearch::new().hit("q1", &["Art fair"]).fail("q2"),
    );

    let response = app
        .oneshot(plan_request(
            r#"{"destination":"Madrid","dates":"March 3-5","preferences":"art"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: TravelResponse = serde_json::from_value(json_body(response).await).unwrap();
    assert_eq!(
        body,
        TravelResponse {
            itinerary: "Day 1: museum".to_string(),
            plan: "Outline".to_string(),
            events: vec!["Art fair".to_string()],
        }
    );
}

#[tokio::test]
async fn test_plan_without_preferences() {
    let app = router(ScriptedLlm::ok(&["Outline", "q1", "Itinerary"]), ScriptedSearch::new());

    let response = app
        .oneshot(plan_request(r#"{"destination":"Madrid","dates":"March"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["events"], serde_json::json!([]));
}

#[tokio::test]
async fn test_blank_destination_is_validation_error() {
    let app = router(ScriptedLlm::ok(&[]), ScriptedSearch::new());

    let response = app
        .oneshot(plan_request(r#"{"destination":"  ","dates":"March"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body.get("stage").is_none());
}

#[tokio::test]
async fn test_stage_failure_reports_stage() {
    let app = router(ScriptedLlm::new(vec![Some("Outline"), None]), ScriptedSearch::new());

    let response = app
        .oneshot(plan_request(r#"{"destination":"Madrid","dates":"March"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "GENERATION_FAILURE");
    assert_eq!(body["stage"], "research");
}

#[tokio::test]
async fn test_incomplete_result_status() {
    let app = router(ScriptedLlm::ok(&[""]), ScriptedSearch::new());

    let response = app
        .oneshot(plan_request(r#"{"destination":"Madrid","dates":"March"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["code"], "INCOMPLETE_RESULT");
    assert_eq!(body["stage"], "plan");
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let app = router(ScriptedLlm::ok(&[]), ScriptedSearch::new());

    let response = app.oneshot(plan_request("{not json")).await.unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_cors_preflight_for_allowed_origin() {
    let app = router(ScriptedLlm::ok(&[]), ScriptedSearch::new());

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/plan")
                .header(header::ORIGIN, "http://localhost:3000")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
}
