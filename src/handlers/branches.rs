use crate::{
    entities::user,
    errors::ServiceError,
    services::catalog::CreateBranchInput,
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use validator::Validate;

use super::{floors, sales};

pub fn branch_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_branches).post(create_branch))
        .route("/qr/:qr_id", get(get_branch_by_qr))
        .route("/:id", get(get_branch).delete(delete_branch))
        .route("/:id/staff", get(branch_staff))
        .route(
            "/:id/floors",
            get(floors::list_floors).post(floors::create_floor),
        )
        .route("/:id/sales/stats", get(sales::branch_sales_stats))
}

async fn list_branches(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let branches = state.catalog.list_branches().await?;
    Ok(Json(branches))
}

async fn get_branch(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let branch = state
        .catalog
        .get_branch_with_details(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Branch {} not found", id)))?;
    Ok(Json(branch))
}

async fn get_branch_by_qr(
    State(state): State<AppState>,
    Path(qr_id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let branch = state
        .catalog
        .get_branch_by_qr(&qr_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Branch not found".to_string()))?;
    Ok(Json(branch))
}

async fn create_branch(
    State(state): State<AppState>,
    Json(input): Json<CreateBranchInput>,
) -> Result<impl IntoResponse, ServiceError> {
    input.validate()?;
    let branch = state.catalog.create_branch(input).await?;
    Ok((StatusCode::CREATED, Json(branch)))
}

async fn delete_branch(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.catalog.delete_branch(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Branch staff listing: everyone assigned to the branch except customers and
/// HQ admins.
async fn branch_staff(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let staff: Vec<_> = state
        .catalog
        .users_by_branch(id)
        .await?
        .into_iter()
        .filter(|u| u.role != user::ROLE_CUSTOMER && u.role != user::ROLE_HQ_ADMIN)
        .collect();
    Ok(Json(staff))
}
