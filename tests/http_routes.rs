//! End-to-end route tests against the in-memory record store.

#![allow(clippy::panic)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use input_gateway::api::build_router;
use input_gateway::app_state::AppState;
use input_gateway::domain::{MemoryStore, RecordStore};
use input_gateway::metrics::ApiMetrics;
use input_gateway::templates::Pages;

fn test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let Ok(pages) = Pages::new() else {
        panic!("templates should compile");
    };
    let Ok(metrics) = ApiMetrics::new() else {
        panic!("metrics should build");
    };
    let state = AppState::new(Arc::clone(&store) as Arc<dyn RecordStore>, pages, metrics);
    (build_router(state), store)
}

fn get(uri: &str) -> Request<Body> {
    let Ok(req) = Request::builder().method("GET").uri(uri).body(Body::empty()) else {
        panic!("failed to build request");
    };
    req
}

fn submit(body: &'static str) -> Request<Body> {
    let Ok(req) = Request::builder()
        .method("POST")
        .uri("/submit")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
    else {
        panic!("failed to build request");
    };
    req
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, axum::http::HeaderMap, String) {
    let Ok(resp) = app.clone().oneshot(req).await else {
        panic!("request failed");
    };
    let status = resp.status();
    let headers = resp.headers().clone();
    let Ok(collected) = resp.into_body().collect().await else {
        panic!("failed to read body");
    };
    let body = String::from_utf8_lossy(&collected.to_bytes()).into_owned();
    (status, headers, body)
}

fn json(body: &str) -> serde_json::Value {
    let Ok(value) = serde_json::from_str(body) else {
        panic!("body is not JSON: {body}");
    };
    value
}

#[tokio::test]
async fn healthz_is_alive() {
    let (app, _) = test_app();
    let (status, _, body) = send(&app, get("/healthz")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), serde_json::json!({ "status": "alive" }));
}

#[tokio::test]
async fn healthz_ignores_database_state() {
    let (app, store) = test_app();
    store.set_available(false);
    let (status, _, body) = send(&app, get("/healthz")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), serde_json::json!({ "status": "alive" }));
}

#[tokio::test]
async fn ready_when_store_reachable() {
    let (app, _) = test_app();
    let (status, _, body) = send(&app, get("/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), serde_json::json!({ "status": "ready" }));
}

#[tokio::test]
async fn not_ready_when_store_down() {
    let (app, store) = test_app();
    store.set_available(false);
    let (status, _, body) = send(&app, get("/ready")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let value = json(&body);
    assert_eq!(value["status"], "not_ready");
    let error = value["error"].as_str().unwrap_or_default();
    assert!(!error.is_empty());
}

#[tokio::test]
async fn form_page_renders() {
    let (app, _) = test_app();
    let (status, headers, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("text/html"));
    assert!(body.contains(r#"name="value""#));
}

#[tokio::test]
async fn submit_redirects_and_list_shows_value() {
    let (app, _) = test_app();

    let (status, headers, _) = send(&app, submit("value=hello")).await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(
        headers.get(header::LOCATION).and_then(|v| v.to_str().ok()),
        Some("/list")
    );

    let (status, _, body) = send(&app, get("/list")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<td>1</td><td>hello</td>"));
}

#[tokio::test]
async fn two_submissions_get_distinct_ids() {
    let (app, store) = test_app();
    let _ = send(&app, submit("value=a")).await;
    let _ = send(&app, submit("value=b")).await;

    let Ok(records) = store.list_all().await else {
        panic!("list failed");
    };
    let [a, b] = records.as_slice() else {
        panic!("expected two records, got {records:?}");
    };
    assert_ne!(a.id, b.id);
    assert!(a.id > 0 && b.id > 0);

    let (_, _, body) = send(&app, get("/list")).await;
    assert!(body.contains("<td>a</td>"));
    assert!(body.contains("<td>b</td>"));
}

#[tokio::test]
async fn url_encoded_values_are_decoded() {
    let (app, store) = test_app();
    let (status, _, _) = send(&app, submit("value=hello+world%21")).await;
    assert_eq!(status, StatusCode::FOUND);

    let Ok(records) = store.list_all().await else {
        panic!("list failed");
    };
    let values: Vec<&str> = records.iter().map(|r| r.value.as_str()).collect();
    assert_eq!(values, ["hello world!"]);
}

#[tokio::test]
async fn submit_without_value_is_rejected() {
    let (app, store) = test_app();
    let (status, _, body) = send(&app, submit("other=1")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json(&body)["error"]["code"], 1001);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn submit_with_empty_body_is_rejected() {
    let (app, store) = test_app();
    let (status, _, _) = send(&app, submit("")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn submit_fails_with_500_when_store_down() {
    let (app, store) = test_app();
    store.set_available(false);
    let (status, _, body) = send(&app, submit("value=lost")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json(&body)["error"]["code"], 3001);

    store.set_available(true);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn list_fails_with_500_when_store_down() {
    let (app, store) = test_app();
    store.set_available(false);
    let (status, _, _) = send(&app, get("/list")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn list_is_stable_without_writes() {
    let (app, _) = test_app();
    let _ = send(&app, submit("value=x")).await;
    let _ = send(&app, submit("value=y")).await;

    let (_, _, first) = send(&app, get("/list")).await;
    let (_, _, second) = send(&app, get("/list")).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn submitted_markup_is_escaped() {
    let (app, _) = test_app();
    let _ = send(&app, submit("value=%3Cb%3Ebold%3C%2Fb%3E")).await;
    let (_, _, body) = send(&app, get("/list")).await;
    assert!(!body.contains("<b>bold"));
    assert!(body.contains("&lt;b&gt;bold"));
}

#[tokio::test]
async fn metrics_exposes_request_counts() {
    let (app, _) = test_app();
    let _ = send(&app, get("/healthz")).await;
    let _ = send(&app, submit("value=counted")).await;

    let (status, headers, body) = send(&app, get("/metrics")).await;
    assert_eq!(status, StatusCode::OK);
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("text/plain"));
    assert!(body.contains("input_gateway_http_requests_total"));
    assert!(body.contains(r#"path="/healthz""#));
    assert!(body.contains("input_gateway_records_created_total 1"));
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (app, _) = test_app();
    let (status, _, _) = send(&app, get("/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
