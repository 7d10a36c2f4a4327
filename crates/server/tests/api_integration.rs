//! Integration tests for the HTTP API, driven through the router with
//! `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use profilenorm::RecordErrorPolicy;
use serde_json::{json, Value};
use server::{build_router, ServerConfig, ServerState};
use tower::util::ServiceExt;

fn app_with(config: ServerConfig) -> (Router, Arc<ServerState>) {
    let state = Arc::new(ServerState::new(config));
    (build_router(state.clone()), state)
}

fn app() -> Router {
    app_with(ServerConfig::default()).0
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

fn sample_profile(urn: &str) -> Value {
    json!({
        "urn": urn,
        "username": "ada-lovelace",
        "firstName": "Ada",
        "lastName": "Lovelace",
        "headline": "Go Go engineer",
        "positions": [
            {"title": "Engineer", "companyId": "1", "companyName": "Analytical",
             "start": {"year": 2015, "month": 1}}
        ],
        "supportedLocales": [{"country": "FR"}]
    })
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = app().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "profilenorm-server");
}

#[tokio::test]
async fn test_ready_endpoint() {
    let response = app().oneshot(get("/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_api_info_lists_normalize_endpoint() {
    let response = app().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let endpoints = body["endpoints"].as_array().unwrap();
    assert!(endpoints.contains(&json!("/api/v1/normalize")));
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let response = app().oneshot(get("/api/v1/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_request_id_is_echoed_or_generated() {
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-123");

    let response = app().oneshot(get("/health")).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_normalize_single_record() {
    let response = app()
        .oneshot(post_json("/api/v1/normalize", &sample_profile("u1")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["total_received"], 1);
    assert_eq!(body["processed"], 1);
    let record = &body["results"][0];
    assert_eq!(record["urn"], "u1");
    assert_eq!(record["keywords"], "Go engineer Engineer");
    assert_eq!(record["languages"], "Français");
    assert_eq!(record["linkedin_url"], "https://www.linkedin.com/in/ada-lovelace");
    assert_eq!(record["current_company_name"], "Analytical");
    assert_eq!(record["profil_details"], sample_profile("u1"));
}

#[tokio::test]
async fn test_normalize_batch_filters_and_preserves_order() {
    let body = json!([
        sample_profile("u1"),
        {"headline": "no urn"},
        sample_profile("u2")
    ]);
    let response = app()
        .oneshot(post_json("/api/v1/normalize", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["total_received"], 3);
    assert_eq!(body["filtered"], 1);
    assert_eq!(body["processed"], 2);
    assert_eq!(body["results"][0]["urn"], "u1");
    assert_eq!(body["results"][1]["urn"], "u2");
}

#[tokio::test]
async fn test_scalar_body_is_bad_request() {
    let response = app()
        .oneshot(post_json("/api/v1/normalize", &json!(42)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "STRUCTURAL_ERROR");
}

#[tokio::test]
async fn test_flagged_record_is_reported() {
    let body = json!([
        sample_profile("u1"),
        {"urn": "u2", "username": "broken%"}
    ]);
    let response = app()
        .oneshot(post_json("/api/v1/normalize", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["failed"], 1);
    assert_eq!(body["errors"][0]["index"], 1);
    assert_eq!(body["errors"][0]["urn"], "u2");
}

#[tokio::test]
async fn test_fail_policy_is_unprocessable() {
    let mut config = ServerConfig::default();
    config.batch.on_record_error = RecordErrorPolicy::Fail;
    let (app, _) = app_with(config);

    let body = json!([sample_profile("u1"), {"urn": "u2", "username": "broken%"}]);
    let response = app
        .oneshot(post_json("/api/v1/normalize", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "INVALID_IDENTIFIER");
}

#[tokio::test]
async fn test_debug_reports_counters() {
    let (app, state) = app_with(ServerConfig::default());

    let batch = json!([sample_profile("u1"), {"headline": "no urn"}]);
    let response = app
        .clone()
        .oneshot(post_json("/api/v1/normalize", &batch))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let snapshot = state.counters.snapshot();
    assert_eq!(snapshot.requests, 1);
    assert_eq!(snapshot.records_received, 2);
    assert_eq!(snapshot.records_filtered, 1);
    assert_eq!(snapshot.records_processed, 1);

    let response = app.oneshot(get("/debug")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["counters"]["records_received"], 2);
    assert_eq!(body["normalize"]["default_month"], 7);
    assert_eq!(body["batch"]["on_record_error"], "flag");
}
