//! REST API tests driven through the router with `oneshot`

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use rollcall::api::{create_router, AppState};

use common::{fixture, service_with, CountingSource};

fn router(source: Arc<CountingSource>) -> Router {
    create_router(AppState::new(service_with(source)))
}

async fn send(router: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let app = router(CountingSource::failing());

    let (status, body) = send(&app, "GET", "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "healthy");
}

#[tokio::test]
async fn test_list_senators() {
    let app = router(CountingSource::serving(fixture("senators_table.html")));

    let (status, body) = send(&app, "GET", "/api/senators").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["count"], 5);
    assert_eq!(body["data"]["origin"], "live");

    let first = &body["data"]["records"][0];
    assert_eq!(first["name"], "Ada Whitfield");
    assert_eq!(first["state"], "AL");
    assert_eq!(first["party"], "Republican");
    assert_eq!(first["officeStartDate"], "2021-01-03");
}

#[tokio::test]
async fn test_list_senators_fallback() {
    let app = router(CountingSource::failing());

    let (status, body) = send(&app, "GET", "/api/senators").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["origin"], "fallback");
    assert_eq!(body["data"]["count"], 10);
}

#[tokio::test]
async fn test_tenure_filter() {
    let app = router(CountingSource::serving(fixture("senators_table.html")));

    let (status, body) = send(&app, "GET", "/api/senators/tenure?before=2015-01-01").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["before"], "2015-01-01");
    assert_eq!(body["data"]["count"], 2);
    assert_eq!(body["data"]["records"][0]["name"], "Benjamin Okafor");
}

#[tokio::test]
async fn test_tenure_filter_rejects_bad_date() {
    let source = CountingSource::serving(fixture("senators_table.html"));
    let app = router(source.clone());

    let (status, body) = send(&app, "GET", "/api/senators/tenure?before=01%2F03%2F2013").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("Invalid date"));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_tenure_filter_requires_date() {
    let app = router(CountingSource::serving(fixture("senators_table.html")));

    let (status, body) = send(&app, "GET", "/api/senators/tenure").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_party_breakdown() {
    let app = router(CountingSource::serving(fixture("senators_table.html")));

    let (status, body) = send(&app, "GET", "/api/senators/parties").await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["Democrat"], 2);
    assert_eq!(data["Republican"], 2);
    assert_eq!(data["Independent"], 1);
    assert_eq!(data["Unknown"], 0);
    assert_eq!(data["total"], 5);
}

#[tokio::test]
async fn test_cache_endpoints() {
    let source = CountingSource::serving(fixture("senators_table.html"));
    let app = router(source.clone());

    let (_, body) = send(&app, "GET", "/api/cache").await;
    assert_eq!(body["data"]["status"]["hasSnapshot"], false);
    assert!(body["data"].get("report").is_none());

    send(&app, "GET", "/api/senators").await;

    let (_, body) = send(&app, "GET", "/api/cache").await;
    let data = &body["data"];
    assert_eq!(data["status"]["hasSnapshot"], true);
    assert_eq!(data["status"]["isValid"], true);
    assert_eq!(data["status"]["recordCount"], 5);
    assert_eq!(data["report"]["strategy"], "header_match");
    assert_eq!(data["report"]["defaultedOfficeStart"], 1);

    let (status, body) = send(&app, "POST", "/api/cache/invalidate").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["invalidated"], true);

    send(&app, "GET", "/api/senators").await;
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_refresh_endpoint() {
    let source = CountingSource::serving(fixture("senators_table.html"));
    let app = router(source.clone());

    send(&app, "GET", "/api/senators").await;
    source.set_html(Some(fixture("reworded_headers.html")));

    let (status, body) = send(&app, "POST", "/api/cache/refresh").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 3);
    assert_eq!(body["data"]["origin"], "live");
    assert_eq!(source.calls(), 2);
}
