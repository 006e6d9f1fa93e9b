use crate::{
    errors::ServiceError,
    services::catalog::{CreateRackInput, UpdateRackInput},
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

/// Routes addressing a rack directly; list/create live under the owning floor.
pub fn rack_routes() -> Router<AppState> {
    Router::new().route("/:id", put(update_rack).delete(delete_rack))
}

pub async fn list_racks(
    State(state): State<AppState>,
    Path(floor_id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let racks = state.catalog.racks_with_items(floor_id).await?;
    Ok(Json(racks))
}

pub async fn create_rack(
    State(state): State<AppState>,
    Path(floor_id): Path<i32>,
    Json(input): Json<CreateRackInput>,
) -> Result<impl IntoResponse, ServiceError> {
    input.validate()?;
    let rack = state.catalog.create_rack(floor_id, input).await?;
    Ok((StatusCode::CREATED, Json(rack)))
}

async fn update_rack(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateRackInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let rack = state.catalog.update_rack(id, input).await?;
    Ok(Json(rack))
}

async fn delete_rack(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.catalog.delete_rack(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
