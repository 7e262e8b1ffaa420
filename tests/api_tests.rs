//! HTTP API tests, driven through the router without binding a socket

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use packwise::api::AppState;
use packwise::models::WardrobeItem;
use packwise::wardrobe::StaticWardrobe;
use packwise::{LocalTripStore, TripPlannerService, web};

fn app() -> (Router, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let wardrobe = StaticWardrobe::new(vec![
        WardrobeItem::new("Linen Shirt", "tops"),
        WardrobeItem::new("Swim Shorts", "bottoms"),
    ]);
    let trips = LocalTripStore::open(dir.path()).unwrap();
    let planner = TripPlannerService::new(Arc::new(wardrobe), None, Arc::new(trips), 1);
    (web::app(AppState::new(Arc::new(planner))), dir)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn beach_trip() -> Value {
    json!({
        "destination": "Algarve",
        "startDate": "2026-07-01T00:00:00Z",
        "endDate": "2026-07-04T00:00:00Z",
        "activities": ["Beach/Pool"],
        "weatherExpected": "Hot and sunny",
        "packingStyle": "minimal"
    })
}

#[tokio::test]
async fn test_health() {
    let (app, _dir) = app();
    let (status, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["service"], "packwise");
}

#[tokio::test]
async fn test_packing_list_uses_planner_wardrobe() {
    let (app, _dir) = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/packing-list",
        Some(json!({ "tripDetails": beach_trip() })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["duration"], 3);
    let essentials = &body["categories"][0];
    assert_eq!(essentials["category"], "Clothing Essentials");
    assert_eq!(essentials["items"][0]["status"], "available");
    assert_eq!(
        essentials["items"][0]["wardrobeMatches"][0]["name"],
        "Linen Shirt"
    );
}

#[tokio::test]
async fn test_packing_list_with_supplied_wardrobe() {
    let (app, _dir) = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/packing-list",
        Some(json!({ "tripDetails": beach_trip(), "wardrobeItems": [] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["coverage"]["available"], 0);
    let last = body["categories"].as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["category"], "Travel Essentials");
    assert_eq!(last["items"].as_array().unwrap().len(), 4);
    assert!(last["items"][0]["wardrobeMatches"].is_null());
}

#[tokio::test]
async fn test_malformed_packing_request_is_rejected() {
    let (app, _dir) = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/packing-list",
        Some(json!({ "tripDetails": { "destination": "Nowhere" } })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().unwrap().contains("startDate"));
}

#[tokio::test]
async fn test_unreadable_bodies_get_error_envelope() {
    let (app, _dir) = app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/trips")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "error");

    let request = Request::builder()
        .method(Method::PUT)
        .uri("/api/trips/some-id")
        .body(Body::from(r#"{"is_favorite": true}"#))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "error");

    let (status, body) = send(&app, Method::GET, "/api/trips?user_id=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_trip_crud() {
    let (app, _dir) = app();
    let new_trip = json!({
        "user_id": 1,
        "destination": "Algarve",
        "start_date": "2026-07-01T00:00:00Z",
        "end_date": "2026-07-04T00:00:00Z",
        "duration": 3,
        "activities": ["Beach/Pool"],
        "weather_expected": "hot",
        "packing_style": "minimal",
        "packing_list": [],
        "notes": "Bring the good sunscreen"
    });

    let (status, body) = send(&app, Method::POST, "/api/trips", Some(new_trip)).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["trip"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["trip"]["wardrobe_matches"], json!({}));

    let (status, body) = send(&app, Method::GET, "/api/trips?user_id=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["trips"][0]["id"], id.as_str());

    let (status, body) = send(&app, Method::GET, "/api/trips?user_id=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);

    let uri = format!("/api/trips/{id}");
    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "is_favorite": true, "notes": "Sunscreen packed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["trip"]["is_favorite"], true);
    assert_eq!(body["trip"]["notes"], "Sunscreen packed");

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["trip"]["destination"], "Algarve");

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], true);

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_save_trip_requires_destination() {
    let (app, _dir) = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/trips",
        Some(json!({
            "user_id": 1,
            "destination": "  ",
            "start_date": "2026-07-01T00:00:00Z",
            "end_date": "2026-07-04T00:00:00Z",
            "duration": 3
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Destination"));
}
