use crate::{
    entities::user,
    errors::ServiceError,
    services::catalog::CreateUserInput,
    AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::Deserialize;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/manager", post(create_manager))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub identifier: String,
    pub role: String,
    pub password: Option<String>,
    pub branch_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateManagerRequest {
    pub username: String,
    pub password: String,
    pub branch_id: Option<i32>,
    pub name: Option<String>,
}

/// Role-dependent login. Managers and admins are password-checked; customers
/// are found or created by identifier on the spot.
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    if request.role == user::ROLE_BRANCH_MANAGER || request.role == user::ROLE_HQ_ADMIN {
        let account = state
            .catalog
            .get_user_by_username(&request.identifier)
            .await?;
        return match account {
            Some(u) if u.password.as_deref() == request.password.as_deref() => Ok(Json(u)),
            _ => Err(ServiceError::AuthError("Invalid credentials".to_string())),
        };
    }

    if let Some(existing) = state
        .catalog
        .get_user_by_username(&request.identifier)
        .await?
    {
        return Ok(Json(existing));
    }

    let email = request
        .identifier
        .contains('@')
        .then(|| request.identifier.clone());
    let created = state
        .catalog
        .create_user(CreateUserInput {
            username: Some(request.identifier.clone()),
            password: None,
            role: user::ROLE_CUSTOMER.to_string(),
            branch_id: request.branch_id,
            name: Some(request.identifier.clone()),
            email,
            phone: Some(request.identifier),
        })
        .await?;
    Ok(Json(created))
}

async fn create_manager(
    State(state): State<AppState>,
    Json(request): Json<CreateManagerRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let name = request.name.unwrap_or_else(|| request.username.clone());
    let created = state
        .catalog
        .create_user(CreateUserInput {
            username: Some(request.username),
            password: Some(request.password),
            role: user::ROLE_BRANCH_MANAGER.to_string(),
            branch_id: request.branch_id,
            name: Some(name),
            email: None,
            phone: None,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}
