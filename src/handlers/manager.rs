use crate::{errors::ServiceError, AppState};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

pub fn manager_routes() -> Router<AppState> {
    Router::new()
        .route("/stats/:branch_id", get(manager_stats))
        .route("/regular-customers/:branch_id", get(regular_customers))
}

async fn manager_stats(
    State(state): State<AppState>,
    Path(branch_id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let stats = state.stats.get_manager_stats(branch_id).await?;
    Ok(Json(stats))
}

async fn regular_customers(
    State(state): State<AppState>,
    Path(branch_id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let customers = state.stats.get_regular_customers(branch_id).await?;
    Ok(Json(customers))
}
