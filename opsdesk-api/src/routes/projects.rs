//! Project and project membership endpoints
//!
//! - `GET /api/projects` - List projects
//! - `POST /api/projects` - Create a project
//! - `GET /api/projects/:project_id` - Fetch a project
//! - `PUT /api/projects/:project_id` - Partially update a project
//! - `DELETE /api/projects/:project_id` - Delete a project and its members
//! - `GET /api/projects/:project_id/members` - List members
//! - `POST /api/projects/:project_id/members` - Add a member (idempotent)
//! - `DELETE /api/projects/:project_id/members/:user_id` - Remove a member

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::Json,
    services::projects::NewProject,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use opsdesk_shared::models::{
    Project, ProjectMember, ProjectMemberRole, ProjectStatus, UpdateProject,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Create project request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    /// Owning client
    pub client_id: Uuid,

    /// Project name
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,

    /// Longer description
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    /// Lifecycle status (defaults to PLANNED)
    pub status: Option<ProjectStatus>,

    /// Budget in workspace currency
    #[validate(range(min = 0.0, message = "Budget must be non-negative"))]
    pub budget: Option<f64>,

    /// Planned start
    pub start_date: Option<DateTime<Utc>>,

    /// Deadline
    pub due_date: Option<DateTime<Utc>>,
}

/// Update project request; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub client_id: Option<Uuid>,

    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    pub status: Option<ProjectStatus>,

    #[validate(range(min = 0.0, message = "Budget must be non-negative"))]
    pub budget: Option<f64>,

    pub start_date: Option<DateTime<Utc>>,

    pub due_date: Option<DateTime<Utc>>,
}

/// Add member request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    /// User to attach
    pub user_id: Uuid,

    /// Role within the project (defaults to CONTRIBUTOR)
    pub member_role: Option<ProjectMemberRole>,
}

/// `GET /api/projects`
pub async fn list(State(state): State<AppState>) -> ApiResult<axum::Json<Vec<Project>>> {
    Ok(axum::Json(state.projects.list().await?))
}

/// `GET /api/projects/:project_id`
pub async fn get(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<axum::Json<Project>> {
    state
        .projects
        .get_by_id(project_id)
        .await?
        .map(axum::Json)
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))
}

/// `POST /api/projects`
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateProjectRequest>,
) -> ApiResult<(StatusCode, axum::Json<Project>)> {
    payload.validate()?;

    let project = state
        .projects
        .create(NewProject {
            client_id: payload.client_id,
            name: payload.name,
            description: payload.description,
            status: payload.status,
            budget: payload.budget,
            start_date: payload.start_date,
            due_date: payload.due_date,
        })
        .await?;

    Ok((StatusCode::CREATED, axum::Json(project)))
}

/// `PUT /api/projects/:project_id`
pub async fn update(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(payload): Json<UpdateProjectRequest>,
) -> ApiResult<axum::Json<Project>> {
    payload.validate()?;

    state
        .projects
        .update(
            project_id,
            UpdateProject {
                client_id: payload.client_id,
                name: payload.name,
                description: payload.description,
                status: payload.status,
                budget: payload.budget,
                start_date: payload.start_date,
                due_date: payload.due_date,
            },
        )
        .await?
        .map(axum::Json)
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))
}

/// `DELETE /api/projects/:project_id`
pub async fn delete(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if state.projects.delete(project_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Project not found".to_string()))
    }
}

/// `GET /api/projects/:project_id/members`
pub async fn list_members(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<axum::Json<Vec<ProjectMember>>> {
    Ok(axum::Json(state.projects.list_members(project_id).await?))
}

/// `POST /api/projects/:project_id/members`
pub async fn add_member(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(payload): Json<AddMemberRequest>,
) -> ApiResult<(StatusCode, axum::Json<ProjectMember>)> {
    payload.validate()?;

    let member = state
        .projects
        .add_member(project_id, payload.user_id, payload.member_role)
        .await?;

    Ok((StatusCode::CREATED, axum::Json(member)))
}

/// `DELETE /api/projects/:project_id/members/:user_id`
pub async fn remove_member(
    State(state): State<AppState>,
    Path((project_id, user_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    if state.projects.remove_member(project_id, user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Member not found".to_string()))
    }
}
