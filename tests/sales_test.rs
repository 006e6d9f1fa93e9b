mod common;

use axum::http::{Method, StatusCode};
use common::{seed_item, seed_store, TestApp};
use serde_json::json;

#[tokio::test]
async fn sale_freezes_discounted_prices_and_decrements_stock() {
    let app = TestApp::new().await;
    let (branch_id, _, rack_id) = seed_store(&app).await;
    let item_id = seed_item(&app, rack_id, "Basmati Rice", 100.0, 10, 50).await;

    let (status, body) = app
        .post_json(
            "/api/sales",
            json!({
                "branchId": branch_id,
                "items": [{ "itemId": item_id, "quantity": 3 }],
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert!(body["saleId"].is_number());

    // 100 * 0.9 * 3
    let (_, stats) = app
        .get_json(&format!("/api/branches/{branch_id}/sales/stats"))
        .await;
    let daily = stats["dailySales"].as_array().unwrap();
    assert_eq!(daily.len(), 1);
    assert!((daily[0]["amount"].as_f64().unwrap() - 270.0).abs() < 1e-9);

    let (_, item) = app.get_json(&format!("/api/items/{item_id}")).await;
    assert_eq!(item["stock"], 47);
}

#[tokio::test]
async fn unknown_sale_lines_are_skipped_but_counted() {
    let app = TestApp::new().await;
    let (branch_id, _, rack_id) = seed_store(&app).await;
    let item_id = seed_item(&app, rack_id, "Tomato", 30.0, 0, 50).await;

    let (status, body) = app
        .post_json(
            "/api/sales",
            json!({
                "branchId": branch_id,
                "items": [
                    { "itemId": item_id, "quantity": 2 },
                    { "itemId": 9999, "quantity": 5 },
                ],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    use sea_orm::EntityTrait;

    let sale_id = body["saleId"].as_i64().unwrap() as i32;
    let sale = smartstore_api::entities::sale::Entity::find_by_id(sale_id)
        .one(&*app.state.db)
        .await
        .unwrap()
        .expect("sale row");

    assert_eq!(sale.items_count, 2);
    assert!((sale.total_amount - 60.0).abs() < 1e-9);
}

#[tokio::test]
async fn sale_total_is_immutable_after_price_change() {
    let app = TestApp::new().await;
    let (branch_id, _, rack_id) = seed_store(&app).await;
    let item_id = seed_item(&app, rack_id, "Paneer", 300.0, 0, 50).await;

    app.post_json(
        "/api/sales",
        json!({
            "branchId": branch_id,
            "items": [{ "itemId": item_id, "quantity": 1 }],
        }),
    )
    .await;

    let response = app
        .request(
            Method::PUT,
            &format!("/api/items/{item_id}"),
            Some(json!({ "price": 999.0 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let (_, stats) = app
        .get_json(&format!("/api/branches/{branch_id}/sales/stats"))
        .await;
    let daily = stats["dailySales"].as_array().unwrap();
    assert!((daily[0]["amount"].as_f64().unwrap() - 300.0).abs() < 1e-9);
}

#[tokio::test]
async fn sales_stats_zero_fill_and_low_stock() {
    let app = TestApp::new().await;
    let (branch_id, _, rack_id) = seed_store(&app).await;
    let sold = seed_item(&app, rack_id, "Kurkure", 20.0, 0, 50).await;
    let unsold = seed_item(&app, rack_id, "Lays Chips", 35.0, 0, 15).await;

    app.post_json(
        "/api/sales",
        json!({
            "branchId": branch_id,
            "items": [{ "itemId": sold, "quantity": 4 }],
        }),
    )
    .await;

    let (status, stats) = app
        .get_json(&format!("/api/branches/{branch_id}/sales/stats"))
        .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(stats["itemsSoldToday"], 1);

    let top = stats["topItems"].as_array().unwrap();
    assert_eq!(top[0]["name"], "Kurkure");
    assert_eq!(top[0]["quantity"], 4);
    // Never-sold items still appear, with zero quantity.
    assert!(top.iter().any(|t| t["name"] == "Lays Chips" && t["quantity"] == 0));

    let least = stats["leastItems"].as_array().unwrap();
    assert_eq!(least[0]["name"], "Lays Chips");
    assert_eq!(least[0]["quantity"], 0);

    // Dashboard low-stock threshold is 20.
    let low = stats["lowStockItems"].as_array().unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0]["name"], "Lays Chips");
    assert_eq!(low[0]["stock"], 15);

    let _ = unsold;
}

#[tokio::test]
async fn repeated_lines_compound_the_stock_decrement() {
    let app = TestApp::new().await;
    let (branch_id, _, rack_id) = seed_store(&app).await;
    let item_id = seed_item(&app, rack_id, "Salt", 20.0, 0, 10).await;

    app.post_json(
        "/api/sales",
        json!({
            "branchId": branch_id,
            "items": [
                { "itemId": item_id, "quantity": 4 },
                { "itemId": item_id, "quantity": 3 },
            ],
        }),
    )
    .await;

    let (_, item) = app.get_json(&format!("/api/items/{item_id}")).await;
    assert_eq!(item["stock"], 3);
}

#[tokio::test]
async fn stock_may_go_negative() {
    let app = TestApp::new().await;
    let (branch_id, _, rack_id) = seed_store(&app).await;
    let item_id = seed_item(&app, rack_id, "Munch", 15.0, 0, 1).await;

    let (status, _) = app
        .post_json(
            "/api/sales",
            json!({
                "branchId": branch_id,
                "items": [{ "itemId": item_id, "quantity": 3 }],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, item) = app.get_json(&format!("/api/items/{item_id}")).await;
    assert_eq!(item["stock"], -2);
}
