//! User endpoints
//!
//! - `GET /api/users` - List users
//! - `POST /api/users` - Create a user
//! - `PATCH /api/users/:id` - Update role and/or active flag

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::Json,
    services::users::NewUser,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use opsdesk_shared::models::{UpdateUser, User, UserRole};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Create user request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Display name
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,

    /// Contact email
    #[validate(length(min = 3, message = "Email must be at least 3 characters"))]
    pub email: String,

    /// Workspace role (defaults to MEMBER)
    pub role: Option<UserRole>,

    /// Active flag (defaults to true)
    pub is_active: Option<bool>,
}

/// `GET /api/users`
pub async fn list(State(state): State<AppState>) -> ApiResult<axum::Json<Vec<User>>> {
    Ok(axum::Json(state.users.list().await?))
}

/// `POST /api/users`
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, axum::Json<User>)> {
    payload.validate()?;

    let user = state
        .users
        .create(NewUser {
            name: payload.name,
            email: payload.email,
            role: payload.role,
            is_active: payload.is_active,
        })
        .await?;

    Ok((StatusCode::CREATED, axum::Json(user)))
}

/// `PATCH /api/users/:id`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUser>,
) -> ApiResult<axum::Json<User>> {
    state
        .users
        .update_role_active(id, payload)
        .await?
        .map(axum::Json)
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
}
