mod common;

use axum::http::StatusCode;
use common::{seed_store, TestApp};
use serde_json::json;

#[tokio::test]
async fn customer_login_finds_or_creates() {
    let app = TestApp::new().await;
    let (branch_id, _, _) = seed_store(&app).await;

    let (status, first) = app
        .post_json(
            "/api/users/login",
            json!({ "identifier": "9876543210", "role": "customer", "branchId": branch_id }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["role"], "customer");
    assert_eq!(first["username"], "9876543210");
    assert_eq!(first["name"], "9876543210");
    assert_eq!(first["phone"], "9876543210");
    assert!(first["email"].is_null());

    // Same identifier logs into the same account.
    let (status, second) = app
        .post_json(
            "/api/users/login",
            json!({ "identifier": "9876543210", "role": "customer", "branchId": branch_id }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["id"], second["id"]);
}

#[tokio::test]
async fn customer_login_with_email_identifier_sets_email() {
    let app = TestApp::new().await;
    let (branch_id, _, _) = seed_store(&app).await;

    let (_, user) = app
        .post_json(
            "/api/users/login",
            json!({ "identifier": "jane@example.com", "role": "customer", "branchId": branch_id }),
        )
        .await;
    assert_eq!(user["email"], "jane@example.com");
}

#[tokio::test]
async fn manager_login_is_password_checked() {
    let app = TestApp::new().await;
    let (branch_id, _, _) = seed_store(&app).await;

    let (status, created) = app
        .post_json(
            "/api/users/manager",
            json!({
                "username": "manager1",
                "password": "manager123",
                "branchId": branch_id,
                "name": "John Manager",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["role"], "branch_manager");

    let (status, _) = app
        .post_json(
            "/api/users/login",
            json!({ "identifier": "manager1", "role": "branch_manager", "password": "wrong" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, user) = app
        .post_json(
            "/api/users/login",
            json!({ "identifier": "manager1", "role": "branch_manager", "password": "manager123" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["username"], "manager1");
}

#[tokio::test]
async fn unknown_manager_login_is_401() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post_json(
            "/api/users/login",
            json!({ "identifier": "ghost", "role": "hq_admin", "password": "whatever" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn staff_listing_excludes_customers_and_hq() {
    let app = TestApp::new().await;
    let (branch_id, _, _) = seed_store(&app).await;

    app.post_json(
        "/api/users/manager",
        json!({ "username": "manager1", "password": "pw", "branchId": branch_id }),
    )
    .await;
    app.post_json(
        "/api/users/login",
        json!({ "identifier": "customer1", "role": "customer", "branchId": branch_id }),
    )
    .await;

    let (status, staff) = app
        .get_json(&format!("/api/branches/{branch_id}/staff"))
        .await;
    assert_eq!(status, StatusCode::OK);

    let staff = staff.as_array().unwrap();
    assert_eq!(staff.len(), 1);
    assert_eq!(staff[0]["username"], "manager1");
}
