//! HTTP surface tests driven through the router with `tower::ServiceExt`.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

use sos_beacon::{api::create_router, state::AppState};

fn test_state() -> Arc<AppState> {
    Arc::new(AppState::new(0, "127.0.0.1".to_string(), 5, 2))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let response = create_router(test_state()).oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test(start_paused = true)]
async fn activate_arms_countdown_and_status_reflects_it() {
    let state = test_state();

    let response = create_router(Arc::clone(&state)).oneshot(post("/activate")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "accepted");
    assert_eq!(body["phase"], "counting");

    let response = create_router(Arc::clone(&state)).oneshot(get("/status")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["phase"], "counting");
    assert_eq!(body["countdown_active"], true);
    assert_eq!(body["countdown_remaining_seconds"], 5);
    assert_eq!(body["total_seconds"], 5);
    assert_eq!(body["last_action"], "activate");
}

#[tokio::test(start_paused = true)]
async fn second_activation_is_reported_as_ignored() {
    let state = test_state();

    let first = create_router(Arc::clone(&state)).oneshot(post("/activate")).await.unwrap();
    assert_eq!(body_json(first).await["status"], "accepted");

    let second = create_router(Arc::clone(&state)).oneshot(post("/activate")).await.unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    let body = body_json(second).await;
    assert_eq!(body["status"], "ignored");
    assert_eq!(body["phase"], "counting");
}

#[tokio::test(start_paused = true)]
async fn cancel_stops_countdown_and_allows_rearm() {
    let state = test_state();

    create_router(Arc::clone(&state)).oneshot(post("/activate")).await.unwrap();

    let response = create_router(Arc::clone(&state)).oneshot(post("/cancel")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["status"], "accepted");
    assert_eq!(body["phase"], "cancelled");

    // The button must be pressable again after a cancel
    let response = create_router(Arc::clone(&state)).oneshot(post("/activate")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["status"], "accepted");
    assert_eq!(body["phase"], "counting");
}

#[tokio::test]
async fn cancel_without_countdown_is_ignored() {
    let response = create_router(test_state()).oneshot(post("/cancel")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ignored");
    assert_eq!(body["phase"], "idle");
}

#[tokio::test]
async fn known_device_action_is_dispatched() {
    let response = create_router(test_state()).oneshot(post("/action/call")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "accepted");
}

#[tokio::test]
async fn unknown_device_action_is_not_found() {
    let response = create_router(test_state()).oneshot(post("/action/teleport")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn contacts_endpoint_lists_emergency_numbers() {
    let response = create_router(test_state()).oneshot(get("/contacts")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let contacts = body.as_array().unwrap();
    assert_eq!(contacts.len(), 3);
    assert_eq!(contacts[0]["name"], "Police");
    assert_eq!(contacts[0]["number"], "100");
}
