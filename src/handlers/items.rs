use crate::{
    errors::ServiceError,
    services::catalog::{CreateItemInput, ItemFilters, UpdateItemInput},
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use validator::Validate;

pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/:id", get(get_item).put(update_item).delete(delete_item))
}

async fn list_items(
    State(state): State<AppState>,
    Query(filters): Query<ItemFilters>,
) -> Result<impl IntoResponse, ServiceError> {
    let items = state.catalog.list_items(filters).await?;
    Ok(Json(items))
}

async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state
        .catalog
        .get_item(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Item {} not found", id)))?;
    Ok(Json(item))
}

async fn create_item(
    State(state): State<AppState>,
    Json(input): Json<CreateItemInput>,
) -> Result<impl IntoResponse, ServiceError> {
    input.validate()?;
    let item = state.catalog.create_item(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateItemInput>,
) -> Result<impl IntoResponse, ServiceError> {
    input.validate()?;
    let item = state.catalog.update_item(id, input).await?;
    Ok(Json(item))
}

async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.catalog.delete_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
