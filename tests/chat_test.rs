mod common;

use common::{body_text, seed_item, seed_store, TestApp};
use serde_json::json;

#[tokio::test]
async fn chat_streams_content_and_done_marker() {
    let app = TestApp::new().await;
    let (branch_id, _, rack_id) = seed_store(&app).await;
    seed_item(&app, rack_id, "Kurkure", 20.0, 0, 50).await;

    let response = app
        .post(
            "/api/chat",
            json!({ "message": "Where is Kurkure?", "branchId": branch_id }),
        )
        .await;

    assert_eq!(response.status(), 200);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/event-stream"));

    let body = body_text(response).await;
    assert!(body.contains("Kurkure"));
    assert!(body.contains("Ground Floor"));
    assert!(body.contains("\\u20b920.00") || body.contains("₹20.00"));
    assert!(body.contains("{\"done\":true}"));
}

#[tokio::test]
async fn chat_never_errors_for_unknown_branch() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/api/chat",
            json!({ "message": "hello", "branchId": 404 }),
        )
        .await;

    assert_eq!(response.status(), 200);
    let body = body_text(response).await;
    assert!(body.contains("{\"done\":true}"));
}

#[tokio::test]
async fn chat_discount_listing_comes_from_live_catalog() {
    let app = TestApp::new().await;
    let (branch_id, _, rack_id) = seed_store(&app).await;
    seed_item(&app, rack_id, "Dairy Milk", 70.0, 20, 50).await;
    seed_item(&app, rack_id, "KitKat", 50.0, 0, 50).await;

    let response = app
        .post(
            "/api/chat",
            json!({ "message": "any discounts?", "branchId": branch_id }),
        )
        .await;
    let body = body_text(response).await;

    assert!(body.contains("Dairy Milk"));
    assert!(body.contains("20% off"));
    assert!(!body.contains("KitKat"));
}
