//! Client endpoints
//!
//! - `GET /api/clients` - List clients
//! - `POST /api/clients` - Create a client
//! - `GET /api/clients/:id` - Fetch a client
//! - `PUT /api/clients/:id` - Partially update a client
//! - `DELETE /api/clients/:id` - Delete a client

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::Json,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use opsdesk_shared::models::{Client, CreateClient, UpdateClient};
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidateEmail, ValidationError};

/// Accepts a well-formed email or the empty string (normalized to absent
/// downstream)
fn email_or_empty(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() || email.validate_email() {
        Ok(())
    } else {
        Err(ValidationError::new("email").with_message("Invalid email".into()))
    }
}

/// Create client request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    /// Company or contact name
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,

    /// Contact email; empty string is treated as absent
    #[validate(custom(function = email_or_empty))]
    pub email: Option<String>,

    /// Contact phone
    #[validate(length(min = 5, message = "Phone must be at least 5 characters"))]
    pub phone: Option<String>,

    /// Free-form notes
    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

/// Update client request; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: Option<String>,

    #[validate(custom(function = email_or_empty))]
    pub email: Option<String>,

    #[validate(length(min = 5, message = "Phone must be at least 5 characters"))]
    pub phone: Option<String>,

    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

/// `GET /api/clients`
pub async fn list(State(state): State<AppState>) -> ApiResult<axum::Json<Vec<Client>>> {
    Ok(axum::Json(state.clients.list().await?))
}

/// `GET /api/clients/:id`
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<axum::Json<Client>> {
    state
        .clients
        .get_by_id(id)
        .await?
        .map(axum::Json)
        .ok_or_else(|| ApiError::NotFound("Client not found".to_string()))
}

/// `POST /api/clients`
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateClientRequest>,
) -> ApiResult<(StatusCode, axum::Json<Client>)> {
    payload.validate()?;

    let client = state
        .clients
        .create(CreateClient {
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            notes: payload.notes,
        })
        .await?;

    Ok((StatusCode::CREATED, axum::Json(client)))
}

/// `PUT /api/clients/:id`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateClientRequest>,
) -> ApiResult<axum::Json<Client>> {
    payload.validate()?;

    state
        .clients
        .update(
            id,
            UpdateClient {
                name: payload.name,
                email: payload.email,
                phone: payload.phone,
                notes: payload.notes,
            },
        )
        .await?
        .map(axum::Json)
        .ok_or_else(|| ApiError::NotFound("Client not found".to_string()))
}

/// `DELETE /api/clients/:id`
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<StatusCode> {
    if state.clients.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Client not found".to_string()))
    }
}
