mod common;

use axum::{body::Body, http::{Request, StatusCode}};
use common::{has_prefix_and_four_digits, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_user_ids_follow_role_prefix() {
    let app = TestApp::new().await;

    let tenant = app.create_user("tenant@example.com", "TENANT").await;
    let landlord = app.create_user("landlord@example.com", "LANDLORD").await;
    let admin = app.create_user("admin@example.com", "ADMIN").await;
    let staff = app.create_user("staff@example.com", "STAFF").await;

    for customer in [&tenant, &landlord] {
        let uid = customer["unique_id"].as_str().unwrap();
        assert!(has_prefix_and_four_digits(uid, "APMS"), "unexpected id {}", uid);
    }
    for employee in [&admin, &staff] {
        let uid = employee["unique_id"].as_str().unwrap();
        assert!(has_prefix_and_four_digits(uid, "APM"), "unexpected id {}", uid);
        assert!(!uid.starts_with("APMS"), "staff id must not use the customer prefix: {}", uid);
    }

    assert_eq!(tenant["role"], "TENANT");
    assert_eq!(tenant["email"], "tenant@example.com");
}

#[tokio::test]
async fn test_user_lifecycle() {
    let app = TestApp::new().await;

    let landlord = app.create_user("Owner@Example.com", "LANDLORD").await;
    app.create_user("renter@example.com", "TENANT").await;
    let id = landlord["id"].as_str().unwrap();
    assert_eq!(landlord["email"], "owner@example.com");

    let (status, all) = app.get("/api/v1/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, landlords) = app.get("/api/v1/users?role=LANDLORD").await;
    let landlords = landlords.as_array().unwrap();
    assert_eq!(landlords.len(), 1);
    assert_eq!(landlords[0]["id"], id);

    let (status, fetched) = app.get(&format!("/api/v1/users/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["unique_id"], landlord["unique_id"]);

    let (status, _) = app.send(
        Request::builder().method("DELETE").uri(format!("/api/v1/users/{}", id)).body(Body::empty()).unwrap()
    ).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get(&format!("/api/v1/users/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send(
        Request::builder().method("DELETE").uri(format!("/api/v1/users/{}", id)).body(Body::empty()).unwrap()
    ).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_role_is_case_insensitive() {
    let app = TestApp::new().await;

    let tenant = app.create_user("lower@example.com", "tenant").await;
    assert_eq!(tenant["role"], "TENANT");
    assert!(has_prefix_and_four_digits(tenant["unique_id"].as_str().unwrap(), "APMS"));

    let staff = app.create_user("mixed@example.com", "Staff").await;
    assert_eq!(staff["role"], "STAFF");
    assert!(!staff["unique_id"].as_str().unwrap().starts_with("APMS"));

    let (status, tenants) = app.get("/api/v1/users?role=tenant").await;
    assert_eq!(status, StatusCode::OK);
    let tenants = tenants.as_array().unwrap();
    assert_eq!(tenants.len(), 1);
    assert_eq!(tenants[0]["email"], "lower@example.com");
}

#[tokio::test]
async fn test_user_validation() {
    let app = TestApp::new().await;

    let (status, _) = app.post_json("/api/v1/users", json!({
        "email": "x@example.com", "full_name": "X", "role": "SUPERUSER"
    })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = app.post_json("/api/v1/users", json!({
        "email": "not-an-email", "full_name": "X", "role": "TENANT"
    })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.post_json("/api/v1/users", json!({
        "email": "blank@example.com", "full_name": "   ", "role": "TENANT"
    })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_email_is_a_conflict_not_an_id_retry() {
    let app = TestApp::new().await;
    app.create_user("dup@example.com", "TENANT").await;

    let (status, body) = app.post_json("/api/v1/users", json!({
        "email": "dup@example.com", "full_name": "Again", "role": "TENANT"
    })).await;

    assert_eq!(status, StatusCode::CONFLICT, "body: {}", body);
}
