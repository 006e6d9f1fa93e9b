mod common;

use axum::http::{Method, StatusCode};
use common::{seed_item, seed_store, TestApp};
use serde_json::json;

#[tokio::test]
async fn create_branch_stores_qr_data_url() {
    let app = TestApp::new().await;

    let (status, branch) = app
        .post_json(
            "/api/branches",
            json!({ "name": "Downtown Store", "isMainBranch": true }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(branch["name"], "Downtown Store");
    assert_eq!(branch["isMainBranch"], true);
    let qr = branch["qrCode"].as_str().expect("qr code present");
    assert!(qr.starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn branch_details_nest_floors_racks_and_items() {
    let app = TestApp::new().await;
    let (branch_id, _floor_id, rack_id) = seed_store(&app).await;
    seed_item(&app, rack_id, "Kurkure", 20.0, 0, 50).await;

    // Second floor inserted out of order to check floor_number ordering.
    let (_, upper) = app
        .post_json(
            &format!("/api/branches/{branch_id}/floors"),
            json!({ "name": "1st Floor", "floorNumber": 1 }),
        )
        .await;
    assert!(upper["id"].is_number());

    let (status, details) = app.get_json(&format!("/api/branches/{branch_id}")).await;
    assert_eq!(status, StatusCode::OK);

    let floors = details["floors"].as_array().expect("floors array");
    assert_eq!(floors.len(), 2);
    assert_eq!(floors[0]["name"], "Ground Floor");
    assert_eq!(floors[1]["name"], "1st Floor");

    let racks = floors[0]["racks"].as_array().expect("racks array");
    assert_eq!(racks.len(), 1);
    let items = racks[0]["items"].as_array().expect("items array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Kurkure");
}

#[tokio::test]
async fn unknown_branch_is_404() {
    let app = TestApp::new().await;
    let (status, _) = app.get_json("/api/branches/9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn qr_lookup_resolves_branch() {
    let app = TestApp::new().await;
    let (branch_id, _, _) = seed_store(&app).await;

    let (status, branch) = app
        .get_json(&format!("/api/branches/qr/BRANCH_{branch_id}"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(branch["id"].as_i64().unwrap() as i32, branch_id);

    let (status, _) = app.get_json("/api/branches/qr/BRANCH_4242").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Malformed payloads resolve to nothing rather than an error.
    let (status, _) = app.get_json("/api/branches/qr/BRANCH_x").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_branch_cascades_to_items() {
    let app = TestApp::new().await;
    let (branch_id, _, rack_id) = seed_store(&app).await;
    let item_id = seed_item(&app, rack_id, "Tomato", 30.0, 0, 50).await;

    let response = app
        .request(Method::DELETE, &format!("/api/branches/{branch_id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (status, _) = app.get_json(&format!("/api/items/{item_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.get_json(&format!("/api/branches/{branch_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn item_filters_follow_precedence() {
    let app = TestApp::new().await;
    let (branch_id, floor_id, rack_id) = seed_store(&app).await;
    seed_item(&app, rack_id, "Kurkure", 20.0, 0, 50).await;
    seed_item(&app, rack_id, "Lays Chips", 35.0, 0, 50).await;

    let (_, other_rack) = app
        .post_json(
            &format!("/api/floors/{floor_id}/racks"),
            json!({ "name": "Rack 2", "category": "Chocolates" }),
        )
        .await;
    let other_rack_id = other_rack["id"].as_i64().unwrap() as i32;
    seed_item(&app, other_rack_id, "Dairy Milk", 70.0, 0, 50).await;

    // rackId filter wins over everything else.
    let (_, items) = app
        .get_json(&format!("/api/items?rackId={rack_id}&search=Dairy"))
        .await;
    assert_eq!(items.as_array().unwrap().len(), 2);

    // branchId walks the floor/rack hierarchy.
    let (_, items) = app.get_json(&format!("/api/items?branchId={branch_id}")).await;
    assert_eq!(items.as_array().unwrap().len(), 3);

    // Name search is a substring match.
    let (_, items) = app.get_json("/api/items?search=kur").await;
    let found = items.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["name"], "Kurkure");

    // category=all disables the category filter.
    let (_, items) = app.get_json("/api/items?category=all").await;
    assert_eq!(items.as_array().unwrap().len(), 3);

    let (_, items) = app.get_json("/api/items?category=Snacks").await;
    assert_eq!(items.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn update_item_is_partial() {
    let app = TestApp::new().await;
    let (_, _, rack_id) = seed_store(&app).await;
    let item_id = seed_item(&app, rack_id, "Tomato", 30.0, 0, 50).await;

    let response = app
        .request(
            Method::PUT,
            &format!("/api/items/{item_id}"),
            Some(json!({ "price": 45.0, "discount": 10 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = common::body_json(response).await;

    assert_eq!(updated["price"], 45.0);
    assert_eq!(updated["discount"], 10);
    assert_eq!(updated["name"], "Tomato");
    assert_eq!(updated["stock"], 50);
}

#[tokio::test]
async fn invalid_branch_payload_is_400() {
    let app = TestApp::new().await;
    let (status, _) = app.post_json("/api/branches", json!({ "name": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
