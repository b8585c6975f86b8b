//! HTTP Endpoint Tests
//!
//! Drives the router in-process:
//! - `GET /health` answers without state
//! - `POST /analyze` returns the report and map for an uploaded CSV
//! - bad uploads and bad query parameters are 400 with a stable code

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use reactorwatch::config::{Config, ProviderKind};
use reactorwatch::http_server::HttpServer;

// =============================================================================
// Helper Functions
// =============================================================================

const BOUNDARY: &str = "reactorwatch-test-boundary";

const TWO_REACTORS: &str = "\
Name,Latitude,Longitude,Age
Reactor A,19,72,10
Reactor B,24,76,45
";

/// Router with location lookups disabled so no test touches the network.
fn offline_router() -> Router {
    let mut config = Config::default();
    config.location.provider = ProviderKind::None;
    HttpServer::new(config).router()
}

fn multipart_body(field: &str, contents: &str) -> String {
    format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"reactors.csv\"\r\n\
         Content-Type: text/csv\r\n\
         \r\n\
         {contents}\r\n\
         --{b}--\r\n",
        b = BOUNDARY,
        field = field,
        contents = contents,
    )
}

fn analyze_request(query: &str, field: &str, contents: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/analyze{}", query))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(field, contents)))
        .unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let (status, json) = send(offline_router(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

// =============================================================================
// Analyze
// =============================================================================

#[tokio::test]
async fn test_analyze_with_query_location() {
    let request = analyze_request("?lat=19&lon=72", "dataset", TWO_REACTORS);
    let (status, json) = send(offline_router(), request).await;

    assert_eq!(status, StatusCode::OK);

    let report = &json["report"];
    assert!(report["run_id"].is_string());
    assert_eq!(report["location"]["status"], "resolved");
    assert_eq!(report["safe_zone"], false);
    assert_eq!(report["reactors"][0]["safety"], "Safe");
    assert_eq!(report["reactors"][0]["within_threshold"], true);
    assert_eq!(report["reactors"][1]["safety"], "Dangerous");
    assert_eq!(report["reactors"][1]["within_threshold"], false);
    assert_eq!(report["alert"]["reactor_names"][0], "Reactor A");

    let map = &json["map"];
    assert_eq!(map["type"], "FeatureCollection");
    assert_eq!(map["features"].as_array().unwrap().len(), 3);
    assert_eq!(map["features"][0]["properties"]["color"], "green");
    assert_eq!(map["features"][1]["properties"]["color"], "purple");
}

#[tokio::test]
async fn test_analyze_threshold_override() {
    let request = analyze_request("?lat=19&lon=72&threshold_km=800", "dataset", TWO_REACTORS);
    let (status, json) = send(offline_router(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["report"]["threshold_km"], 800.0);
    assert_eq!(json["report"]["reactors"][1]["within_threshold"], true);
}

#[tokio::test]
async fn test_analyze_without_location_is_unresolved() {
    let request = analyze_request("", "dataset", TWO_REACTORS);
    let (status, json) = send(offline_router(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["report"]["location"]["status"], "unresolved");
    assert_eq!(json["report"]["safe_zone"], true);
    assert!(json["report"]["alert"].is_null());
}

// =============================================================================
// Rejections
// =============================================================================

#[tokio::test]
async fn test_malformed_dataset_is_bad_request() {
    let csv = "Name,Latitude,Longitude\nReactor A,19,72\n";
    let request = analyze_request("?lat=19&lon=72", "dataset", csv);
    let (status, json) = send(offline_router(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "REACTOR_DATASET_MISSING_COLUMN");
    assert!(json["error"].as_str().unwrap().contains("Age"));
}

#[tokio::test]
async fn test_missing_dataset_field_is_bad_request() {
    let request = analyze_request("?lat=19&lon=72", "upload", TWO_REACTORS);
    let (status, json) = send(offline_router(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "REACTOR_HTTP_MISSING_DATASET");
}

#[tokio::test]
async fn test_half_location_is_bad_request() {
    let request = analyze_request("?lat=19", "dataset", TWO_REACTORS);
    let (status, json) = send(offline_router(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "REACTOR_HTTP_BAD_QUERY");
}

#[tokio::test]
async fn test_out_of_range_location_is_bad_request() {
    let request = analyze_request("?lat=95&lon=72", "dataset", TWO_REACTORS);
    let (status, json) = send(offline_router(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "REACTOR_HTTP_BAD_QUERY");
}
