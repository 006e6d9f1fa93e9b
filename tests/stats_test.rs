mod common;

use axum::http::StatusCode;
use common::{seed_item, seed_store, TestApp};
use serde_json::json;

async fn login_customer(app: &TestApp, identifier: &str, branch_id: i32) -> i32 {
    let (status, user) = app
        .post_json(
            "/api/users/login",
            json!({ "identifier": identifier, "role": "customer", "branchId": branch_id }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    user["id"].as_i64().expect("user id") as i32
}

async fn record_sale(app: &TestApp, branch_id: i32, user_id: i32, item_id: i32, quantity: i32) {
    let (status, _) = app
        .post_json(
            "/api/sales",
            json!({
                "branchId": branch_id,
                "userId": user_id,
                "items": [{ "itemId": item_id, "quantity": quantity }],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn low_stock_threshold_is_strict() {
    let app = TestApp::new().await;
    let (branch_id, _, rack_id) = seed_store(&app).await;
    let low = seed_item(&app, rack_id, "Ghee", 500.0, 0, 9).await;
    seed_item(&app, rack_id, "Butter", 400.0, 0, 10).await;
    seed_item(&app, rack_id, "Cheese", 350.0, 0, 100).await;

    let (status, stats) = app
        .get_json(&format!("/api/manager/stats/{branch_id}"))
        .await;
    assert_eq!(status, StatusCode::OK);

    let low_stock = stats["lowStockItems"].as_array().unwrap();
    assert_eq!(low_stock.len(), 1);
    assert_eq!(low_stock[0]["id"].as_i64().unwrap() as i32, low);
    assert_eq!(low_stock[0]["name"], "Ghee");
    assert_eq!(low_stock[0]["stock"], 9);
}

#[tokio::test]
async fn manager_stats_cover_todays_activity() {
    let app = TestApp::new().await;
    let (branch_id, _, rack_id) = seed_store(&app).await;
    let item_id = seed_item(&app, rack_id, "Paneer", 300.0, 10, 50).await;
    let user_id = login_customer(&app, "9876543210", branch_id).await;

    record_sale(&app, branch_id, user_id, item_id, 2).await;

    let (_, stats) = app
        .get_json(&format!("/api/manager/stats/{branch_id}"))
        .await;

    // 300 * 0.9 * 2
    assert!((stats["todayRevenue"].as_f64().unwrap() - 540.0).abs() < 1e-9);

    let customers = stats["todayCustomers"].as_array().unwrap();
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0]["id"].as_i64().unwrap() as i32, user_id);
    assert!((customers[0]["totalSpent"].as_f64().unwrap() - 540.0).abs() < 1e-9);
    let purchases = customers[0]["purchases"].as_array().unwrap();
    assert_eq!(purchases.len(), 1);
    assert_eq!(purchases[0]["name"], "Paneer");
    assert_eq!(purchases[0]["quantity"], 2);
    assert!((purchases[0]["price"].as_f64().unwrap() - 270.0).abs() < 1e-9);

    let sold = stats["soldItemsToday"].as_array().unwrap();
    assert_eq!(sold.len(), 1);
    assert_eq!(sold[0]["quantity"], 2);

    let top = stats["topProducts"].as_array().unwrap();
    assert_eq!(top[0]["name"], "Paneer");
    assert_eq!(top[0]["quantity"], 2);
}

#[tokio::test]
async fn manager_stats_are_idempotent() {
    let app = TestApp::new().await;
    let (branch_id, _, rack_id) = seed_store(&app).await;
    let item_id = seed_item(&app, rack_id, "Tomato", 30.0, 0, 8).await;
    let user_id = login_customer(&app, "alice", branch_id).await;
    record_sale(&app, branch_id, user_id, item_id, 1).await;

    let (_, first) = app
        .get_json(&format!("/api/manager/stats/{branch_id}"))
        .await;
    let (_, second) = app
        .get_json(&format!("/api/manager/stats/{branch_id}"))
        .await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn empty_branch_yields_empty_reports() {
    let app = TestApp::new().await;
    let (branch_id, _, _) = seed_store(&app).await;

    let (status, stats) = app
        .get_json(&format!("/api/manager/stats/{branch_id}"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["todayCustomers"].as_array().unwrap().len(), 0);
    assert_eq!(stats["soldItemsToday"].as_array().unwrap().len(), 0);
    assert_eq!(stats["lowStockItems"].as_array().unwrap().len(), 0);
    assert_eq!(stats["topProducts"].as_array().unwrap().len(), 0);
    assert_eq!(stats["todayRevenue"].as_f64().unwrap(), 0.0);

    let (status, customers) = app
        .get_json(&format!("/api/manager/regular-customers/{branch_id}"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(customers.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn regular_customers_need_two_visits_sorted_by_spend() {
    let app = TestApp::new().await;
    let (branch_id, _, rack_id) = seed_store(&app).await;
    let cheap = seed_item(&app, rack_id, "Salt", 20.0, 0, 100).await;
    let pricey = seed_item(&app, rack_id, "Ghee", 500.0, 0, 100).await;

    let one_timer = login_customer(&app, "casual", branch_id).await;
    let regular_small = login_customer(&app, "small", branch_id).await;
    let regular_big = login_customer(&app, "big", branch_id).await;

    record_sale(&app, branch_id, one_timer, pricey, 3).await;

    record_sale(&app, branch_id, regular_small, cheap, 1).await;
    record_sale(&app, branch_id, regular_small, cheap, 1).await;

    record_sale(&app, branch_id, regular_big, pricey, 1).await;
    record_sale(&app, branch_id, regular_big, pricey, 2).await;

    let (_, customers) = app
        .get_json(&format!("/api/manager/regular-customers/{branch_id}"))
        .await;
    let customers = customers.as_array().unwrap();

    assert_eq!(customers.len(), 2);
    assert_eq!(customers[0]["id"].as_i64().unwrap() as i32, regular_big);
    assert_eq!(customers[0]["visitCount"], 2);
    assert!((customers[0]["totalSpent"].as_f64().unwrap() - 1500.0).abs() < 1e-9);
    assert_eq!(customers[1]["id"].as_i64().unwrap() as i32, regular_small);

    // items[] aggregates quantity per distinct item across all visits.
    let items = customers[0]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Ghee");
    assert_eq!(items[0]["quantity"], 3);
}
