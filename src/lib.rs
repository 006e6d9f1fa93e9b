pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod seed;
pub mod services;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use config::AppConfig;
use services::{
    catalog::CatalogService,
    chat::{assistant::AssistantClient, ChatService},
    sales::SalesService,
    stats::StatsService,
};

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: Arc<AppConfig>,
    pub catalog: CatalogService,
    pub sales: SalesService,
    pub stats: StatsService,
    pub chat: ChatService,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: Arc<AppConfig>) -> Self {
        let catalog = CatalogService::new(db.clone());
        let sales = SalesService::new(db.clone());
        let stats = StatsService::new(db.clone());

        let assistant = config.ai_api_url.clone().map(|url| {
            AssistantClient::new(url, config.ai_api_key.clone(), config.ai_model.clone())
        });
        let chat = ChatService::new(catalog.clone(), assistant);

        Self {
            db,
            config,
            catalog,
            sales,
            stats,
            chat,
        }
    }
}

/// The `/api` route tree.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/branches", handlers::branches::branch_routes())
        .nest("/floors", handlers::floors::floor_routes())
        .nest("/racks", handlers::racks::rack_routes())
        .nest("/items", handlers::items::item_routes())
        .nest("/users", handlers::users::user_routes())
        .nest("/sales", handlers::sales::sales_routes())
        .nest("/manager", handlers::manager::manager_routes())
        .nest("/chat", handlers::chat::chat_routes())
}

/// Full application router with request tracing.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match db::check_connection(&state.db).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "ok" })),
        ),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "status": "unavailable" })),
        ),
    }
}
