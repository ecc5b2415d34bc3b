#![cfg(feature = "server")]

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use receipt_points::api::{router, AppState, ErrorResponse, HealthResponse, PointsResponse, ProcessResponse};
use receipt_points::ReceiptStore;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    router(AppState::new(Arc::new(ReceiptStore::new())))
}

fn target_receipt() -> Value {
    json!({
        "retailer": "Target",
        "purchaseDate": "2022-01-01",
        "purchaseTime": "13:01",
        "items": [
            {"shortDescription": "Mountain Dew 12PK", "price": "6.49"},
            {"shortDescription": "Emils Cheese Pizza", "price": "12.25"},
            {"shortDescription": "Knorr Creamy Chicken", "price": "1.26"},
            {"shortDescription": "Doritos Nacho Cheese", "price": "3.35"},
            {"shortDescription": "   Klarbrunn 12-PK 12 FL OZ  ", "price": "12.00"}
        ],
        "total": "35.35"
    })
}

fn post_json(body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/receipts/process")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send<T: DeserializeOwned>(app: &Router, req: Request<Body>) -> (StatusCode, T) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_process_then_points() {
    let app = app();

    let (status, created): (_, ProcessResponse) = send(&app, post_json(&target_receipt())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(uuid::Uuid::parse_str(&created.id).is_ok());

    let uri = format!("/receipts/{}/points", created.id);
    let (status, points): (_, PointsResponse) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(points.points, 28);
}

#[tokio::test]
async fn test_process_without_body() {
    let app = app();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/receipts/process")
        .body(Body::empty())
        .unwrap();

    let (status, err): (_, ErrorResponse) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err.error, "Invalid receipt received");
}

#[tokio::test]
async fn test_process_invalid_date() {
    let app = app();
    let mut body = target_receipt();
    body["purchaseDate"] = json!("20-01-01");

    let (status, err): (_, ErrorResponse) = send(&app, post_json(&body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err.error, "Date is in the wrong format");
}

#[tokio::test]
async fn test_process_invalid_time() {
    let app = app();
    let mut body = target_receipt();
    body["purchaseTime"] = json!("1:1");

    let (status, err): (_, ErrorResponse) = send(&app, post_json(&body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err.error, "Time is in the wrong format");
}

#[tokio::test]
async fn test_process_rejects_bad_shapes() {
    let app = app();

    let mut no_items = target_receipt();
    no_items["items"] = json!([]);

    let mut numeric_total = target_receipt();
    numeric_total["total"] = json!(35.35);

    let mut missing_retailer = target_receipt();
    missing_retailer.as_object_mut().unwrap().remove("retailer");

    for body in [no_items, numeric_total, missing_retailer] {
        let (status, err): (_, ErrorResponse) = send(&app, post_json(&body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(err.error, "Invalid receipt received");
    }

    let (_, health): (_, HealthResponse) = send(&app, get("/health")).await;
    assert_eq!(health.receipts, 0);
}

#[tokio::test]
async fn test_points_unknown_id() {
    let app = app();

    let (status, err): (_, ErrorResponse) = send(&app, get("/receipts/does-not-exist/points")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err.error, "Couldn't find receipt with id=does-not-exist");
}

#[tokio::test]
async fn test_health_counts_receipts() {
    let app = app();
    send::<ProcessResponse>(&app, post_json(&target_receipt())).await;
    send::<ProcessResponse>(&app, post_json(&target_receipt())).await;

    let (status, health): (_, HealthResponse) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health.status, "ok");
    assert_eq!(health.receipts, 2);
    assert_eq!(health.version, receipt_points::VERSION);
}

#[tokio::test]
async fn test_concurrent_submissions() {
    let app = app();

    let tasks: Vec<_> = (0..32)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move {
                let (status, created): (_, ProcessResponse) =
                    send(&app, post_json(&target_receipt())).await;
                assert_eq!(status, StatusCode::CREATED);
                created.id
            })
        })
        .collect();

    let mut ids = Vec::new();
    for task in tasks {
        ids.push(task.await.unwrap());
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 32);

    for id in ids {
        let (status, points): (_, PointsResponse) =
            send(&app, get(&format!("/receipts/{}/points", id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(points.points, 28);
    }
}
