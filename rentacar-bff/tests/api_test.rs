use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::DateTime;
use rentacar_bff::{app, AppState};
use rentacar_store::QueueTransport;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> Router {
    // Local-mode transport: enqueues are simulated, no broker needed.
    app(AppState {
        transport: Arc::new(QueueTransport::from_config(None)),
    })
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_reports_healthy_with_timestamp() {
    let response = test_app()
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "rentacar-bff");
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_create_booking_returns_unique_ids() {
    let booking = json!({
        "customerName": "Jane Smith",
        "email": "jane@example.com",
        "carType": "BMW X5",
        "pickupDate": "2026-02-01",
        "returnDate": "2026-02-05",
        "rentalDays": 4,
        "totalAmount": 400
    });

    let first = test_app()
        .oneshot(post_json("/api/bookings", booking.clone()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);
    let first = response_json(first).await;
    assert_eq!(first["success"], true);
    assert_eq!(first["status"], "processing");
    let first_id = first["bookingId"].as_str().unwrap().to_string();
    assert!(!first_id.is_empty());

    let second = test_app()
        .oneshot(post_json("/api/bookings", booking))
        .await
        .unwrap();
    let second = response_json(second).await;
    assert_ne!(second["bookingId"].as_str().unwrap(), first_id);
}

#[tokio::test]
async fn test_partial_booking_body_is_accepted() {
    let response = test_app()
        .oneshot(post_json("/api/bookings", json!({ "customerName": "Jane Smith" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_booking_status_always_processing() {
    let response = test_app()
        .oneshot(
            Request::get("/api/bookings/abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["bookingId"], "abc-123");
    assert_eq!(body["status"], "processing");
}

#[tokio::test]
async fn test_create_payment_acknowledges() {
    let response = test_app()
        .oneshot(post_json(
            "/api/payments",
            json!({ "bookingId": "b1", "amount": 400 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    assert!(!body["paymentId"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_unmatched_route_returns_404() {
    let response = test_app()
        .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Route not found");
}
