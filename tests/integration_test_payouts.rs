mod common;

use axum::{body::Body, http::{Request, StatusCode}};
use common::TestApp;
use serde_json::{json, Value};

async fn add_expense(app: &TestApp, landlord_id: &str, amount: i64) -> Value {
    let (status, body) = app.post_json("/api/v1/expenses", json!({
        "landlord_id": landlord_id, "description": "Plumbing", "amount": amount
    })).await;
    assert_eq!(status, StatusCode::OK, "expense failed: {}", body);
    body
}

async fn request_payout(app: &TestApp, landlord_id: &str, amount: i64) -> Value {
    let (status, body) = app.post_json("/api/v1/payouts", json!({
        "landlord_id": landlord_id, "amount": amount
    })).await;
    assert_eq!(status, StatusCode::OK, "payout failed: {}", body);
    body
}

#[tokio::test]
async fn test_payout_periods_chain_and_claim_expenses() {
    let app = TestApp::new().await;
    let landlord = app.create_user("owner@example.com", "LANDLORD").await;
    let other = app.create_user("other@example.com", "LANDLORD").await;
    let lid = landlord["id"].as_str().unwrap();
    let other_id = other["id"].as_str().unwrap();

    add_expense(&app, lid, 5_000).await;
    add_expense(&app, lid, 2_500).await;
    add_expense(&app, other_id, 9_999).await;

    // 1. First payout covers everything since the epoch
    let first = request_payout(&app, lid, 100_000).await;
    assert_eq!(first["status"], "PENDING");

    let (status, approval) = app.admin_post(&format!("/api/v1/payouts/{}/approve", first["id"].as_str().unwrap())).await;
    assert_eq!(status, StatusCode::OK, "approve failed: {}", approval);
    assert_eq!(approval["payout"]["status"], "APPROVED");
    assert_eq!(approval["payout"]["period_start"], "1970-01-01T00:00:00Z");
    assert_eq!(approval["reassigned_expenses"], 2);
    assert_eq!(approval["expense_total"], 7_500);

    // 2. Approving twice is rejected
    let (status, _) = app.admin_post(&format!("/api/v1/payouts/{}/approve", first["id"].as_str().unwrap())).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // 3. Next payout starts where the previous one ended
    add_expense(&app, lid, 1_000).await;
    let second = request_payout(&app, lid, 50_000).await;
    let (status, approval2) = app.admin_post(&format!("/api/v1/payouts/{}/approve", second["id"].as_str().unwrap())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approval2["payout"]["period_start"], approval["payout"]["period_end"]);
    assert_eq!(approval2["reassigned_expenses"], 1);
    assert_eq!(approval2["expense_total"], 1_000);

    // 4. The other landlord's expense is untouched
    let (_, expenses) = app.get(&format!("/api/v1/landlords/{}/expenses", other_id)).await;
    assert_eq!(expenses[0]["payout_id"], Value::Null);

    let (_, expenses) = app.get(&format!("/api/v1/landlords/{}/expenses", lid)).await;
    let claimed: Vec<_> = expenses.as_array().unwrap().iter()
        .filter(|e| e["payout_id"] == first["id"])
        .collect();
    assert_eq!(claimed.len(), 2);

    let (_, payouts) = app.get(&format!("/api/v1/landlords/{}/payouts", lid)).await;
    assert_eq!(payouts.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_payout_approval_requires_admin_key() {
    let app = TestApp::new().await;
    let landlord = app.create_user("owner@example.com", "LANDLORD").await;
    let payout = request_payout(&app, landlord["id"].as_str().unwrap(), 10_000).await;
    let uri = format!("/api/v1/payouts/{}/approve", payout["id"].as_str().unwrap());

    let (status, _) = app.send(Request::builder().method("POST").uri(&uri).body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.send(
        Request::builder().method("POST").uri(&uri).header("X-Admin-Key", "wrong").body(Body::empty()).unwrap()
    ).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.admin_post("/api/v1/payouts/does-not-exist/approve").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_payout_and_expense_validation() {
    let app = TestApp::new().await;
    let tenant = app.create_user("renter@example.com", "TENANT").await;
    let landlord = app.create_user("owner@example.com", "LANDLORD").await;

    let (status, _) = app.post_json("/api/v1/payouts", json!({
        "landlord_id": tenant["id"], "amount": 100
    })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.post_json("/api/v1/payouts", json!({
        "landlord_id": landlord["id"], "amount": 0
    })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.post_json("/api/v1/payouts", json!({
        "landlord_id": "missing", "amount": 100
    })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.post_json("/api/v1/expenses", json!({
        "landlord_id": landlord["id"], "description": "Paint", "amount": -5
    })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.post_json("/api/v1/expenses", json!({
        "landlord_id": tenant["id"], "description": "Paint", "amount": 5
    })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_concurrent_approvals_never_overlap() {
    let app = TestApp::new().await;
    let landlord = app.create_user("owner@example.com", "LANDLORD").await;
    let lid = landlord["id"].as_str().unwrap();
    add_expense(&app, lid, 4_000).await;

    let a = request_payout(&app, lid, 10_000).await;
    let b = request_payout(&app, lid, 20_000).await;
    let uri_a = format!("/api/v1/payouts/{}/approve", a["id"].as_str().unwrap());
    let uri_b = format!("/api/v1/payouts/{}/approve", b["id"].as_str().unwrap());

    let ((status_a, _), (status_b, _)) = tokio::join!(app.admin_post(&uri_a), app.admin_post(&uri_b));

    // The later one may find its window already closed; it must never reuse the same start.
    for status in [status_a, status_b] {
        assert!(status == StatusCode::OK || status == StatusCode::CONFLICT, "unexpected {}", status);
    }
    assert!(status_a == StatusCode::OK || status_b == StatusCode::OK);

    let (_, payouts) = app.get(&format!("/api/v1/landlords/{}/payouts", lid)).await;
    let mut approved: Vec<Value> = payouts.as_array().unwrap().iter()
        .filter(|p| p["status"] == "APPROVED")
        .cloned()
        .collect();
    approved.sort_by(|x, y| x["period_start"].as_str().cmp(&y["period_start"].as_str()));

    assert_eq!(approved[0]["period_start"], "1970-01-01T00:00:00Z");
    for pair in approved.windows(2) {
        assert_eq!(pair[1]["period_start"], pair[0]["period_end"]);
    }

    let (_, expenses) = app.get(&format!("/api/v1/landlords/{}/expenses", lid)).await;
    assert_eq!(expenses[0]["payout_id"], approved[0]["id"]);
}
