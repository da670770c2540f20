mod common;

use axum::{body::Body, http::{header, Request, StatusCode}};
use common::{TestApp, PAYSTACK_SECRET};
use serde_json::json;

fn charge(reference: &str) -> serde_json::Value {
    json!({
        "event": "charge.success",
        "data": {
            "reference": reference,
            "amount": 350000,
            "currency": "NGN",
            "status": "success",
            "channel": "card",
            "paid_at": "2026-01-05T10:00:00.000Z",
            "metadata": { "user_id": "u-1", "property_id": "p-1" }
        }
    })
}

#[tokio::test]
async fn test_signed_charge_is_recorded_once() {
    let app = TestApp::new().await;

    let (status, ack) = app.webhook(&charge("ref-001"), PAYSTACK_SECRET).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack["recorded"], true);

    let (status, ack) = app.webhook(&charge("ref-001"), PAYSTACK_SECRET).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack["recorded"], false);

    let (status, payments) = app.admin_get("/api/v1/payments").await;
    assert_eq!(status, StatusCode::OK);
    let payments = payments.as_array().unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0]["reference"], "ref-001");
    assert_eq!(payments[0]["amount"], 350000);
    assert_eq!(payments[0]["channel"], "card");
    assert_eq!(payments[0]["property_id"], "p-1");
}

#[tokio::test]
async fn test_bad_signature_is_rejected() {
    let app = TestApp::new().await;

    let (status, _) = app.webhook(&charge("ref-002"), "sk_attacker").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.send(
        Request::builder().method("POST").uri("/api/v1/webhooks/paystack")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(charge("ref-003").to_string())).unwrap()
    ).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, payments) = app.admin_get("/api/v1/payments").await;
    assert!(payments.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_other_events_and_bad_payloads() {
    let app = TestApp::new().await;

    let transfer = json!({
        "event": "transfer.success",
        "data": { "reference": "tr-1", "amount": 100 }
    });
    let (status, ack) = app.webhook(&transfer, PAYSTACK_SECRET).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack["recorded"], false);

    let (status, _) = app.webhook(&json!({ "event": "charge.success" }), PAYSTACK_SECRET).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.get("/api/v1/payments").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_charge_event_without_charge_fields_is_acknowledged() {
    let app = TestApp::new().await;

    let subscription = json!({
        "event": "subscription.create",
        "data": { "subscription_code": "SUB_x", "status": "active" }
    });
    let (status, ack) = app.webhook(&subscription, PAYSTACK_SECRET).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack["recorded"], false);

    let (status, ack) = app.webhook(&json!({ "event": "customeridentification.success" }), PAYSTACK_SECRET).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack["recorded"], false);

    let (_, payments) = app.admin_get("/api/v1/payments").await;
    assert!(payments.as_array().unwrap().is_empty());
}
