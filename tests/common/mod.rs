use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use smartstore_api::{
    app_router,
    config::AppConfig,
    db::{self, DbConfig},
    AppState,
};
use tower::ServiceExt;

/// Test harness backed by an in-memory SQLite database. One connection keeps
/// the database alive for the lifetime of the app.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        let cfg = AppConfig {
            database_url: "sqlite::memory:".to_string(),
            host: "127.0.0.1".to_string(),
            port: 18080,
            environment: "test".to_string(),
            log_level: "warn".to_string(),
            log_json: false,
            auto_migrate: true,
            seed_on_start: false,
            cors_allowed_origins: None,
            db_max_connections: 1,
            db_min_connections: 1,
            db_connect_timeout_secs: 30,
            db_idle_timeout_secs: 600,
            db_acquire_timeout_secs: 8,
            ai_api_url: None,
            ai_api_key: None,
            ai_model: "gpt-3.5-turbo".to_string(),
        };

        let db_cfg = DbConfig {
            url: cfg.database_url.clone(),
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        };
        let pool = db::establish_connection_with_config(&db_cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), Arc::new(cfg));
        let router = app_router(state.clone());

        Self { router, state }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    pub async fn get(&self, uri: &str) -> axum::response::Response {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> axum::response::Response {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let response = self.get(uri).await;
        let status = response.status();
        (status, body_json(response).await)
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = self.post(uri, body).await;
        let status = response.status();
        (status, body_json(response).await)
    }
}

/// Creates a branch with one floor and one rack; returns their ids.
#[allow(dead_code)]
pub async fn seed_store(app: &TestApp) -> (i32, i32, i32) {
    let (status, branch) = app
        .post_json(
            "/api/branches",
            serde_json::json!({ "name": "Test Branch", "address": "1 Test Way" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let branch_id = branch["id"].as_i64().expect("branch id") as i32;

    let (status, floor) = app
        .post_json(
            &format!("/api/branches/{branch_id}/floors"),
            serde_json::json!({ "name": "Ground Floor", "floorNumber": 0 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let floor_id = floor["id"].as_i64().expect("floor id") as i32;

    let (status, rack) = app
        .post_json(
            &format!("/api/floors/{floor_id}/racks"),
            serde_json::json!({ "name": "Rack 1", "category": "Snacks" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let rack_id = rack["id"].as_i64().expect("rack id") as i32;

    (branch_id, floor_id, rack_id)
}

#[allow(dead_code)]
pub async fn seed_item(
    app: &TestApp,
    rack_id: i32,
    name: &str,
    price: f64,
    discount: i32,
    stock: i32,
) -> i32 {
    let (status, item) = app
        .post_json(
            "/api/items",
            serde_json::json!({
                "name": name,
                "category": "Snacks",
                "price": price,
                "discount": discount,
                "rackId": rack_id,
                "imageUrl": "https://example.com/item.png",
                "stock": stock,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    item["id"].as_i64().expect("item id") as i32
}

pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read response body")
        .to_bytes();
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body was not valid json")
    }
}

#[allow(dead_code)]
pub async fn body_text(response: axum::response::Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read response body")
        .to_bytes();
    String::from_utf8_lossy(&bytes).into_owned()
}
