use crate::{errors::ServiceError, services::sales::CreateSaleRequest, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::Serialize;

pub fn sales_routes() -> Router<AppState> {
    Router::new().route("/", post(create_sale))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateSaleResponse {
    success: bool,
    sale_id: i32,
}

async fn create_sale(
    State(state): State<AppState>,
    Json(request): Json<CreateSaleRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let sale = state.sales.create_sale(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateSaleResponse {
            success: true,
            sale_id: sale.id,
        }),
    ))
}

/// GET /api/branches/:id/sales/stats, mounted from the branches router.
pub async fn branch_sales_stats(
    State(state): State<AppState>,
    Path(branch_id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let stats = state.sales.get_sales_stats(branch_id).await?;
    Ok(Json(stats))
}
