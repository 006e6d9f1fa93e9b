use crate::{
    errors::ServiceError,
    services::catalog::{CreateFloorInput, UpdateFloorInput},
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::put,
    Json, Router,
};
use validator::Validate;

use super::racks;

/// Routes addressing a floor directly; floor list/create live under the
/// owning branch in the branches router.
pub fn floor_routes() -> Router<AppState> {
    Router::new()
        .route("/:id", put(update_floor).delete(delete_floor))
        .route(
            "/:id/racks",
            axum::routing::get(racks::list_racks).post(racks::create_rack),
        )
}

pub async fn list_floors(
    State(state): State<AppState>,
    Path(branch_id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let floors = state.catalog.floors_with_racks(branch_id).await?;
    Ok(Json(floors))
}

pub async fn create_floor(
    State(state): State<AppState>,
    Path(branch_id): Path<i32>,
    Json(input): Json<CreateFloorInput>,
) -> Result<impl IntoResponse, ServiceError> {
    input.validate()?;
    let floor = state.catalog.create_floor(branch_id, input).await?;
    Ok((StatusCode::CREATED, Json(floor)))
}

async fn update_floor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateFloorInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let floor = state.catalog.update_floor(id, input).await?;
    Ok(Json(floor))
}

async fn delete_floor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.catalog.delete_floor(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
