//! Task endpoints
//!
//! - `GET /api/projects/:project_id/tasks` - List a project's tasks
//! - `POST /api/projects/:project_id/tasks` - Create a task in a project
//! - `PUT /api/projects/:project_id/tasks/:task_id` - Partially update a task
//! - `DELETE /api/projects/:project_id/tasks/:task_id` - Delete a task
//! - `PATCH /api/tasks/:task_id/status` - Set the status, recording history
//! - `GET /api/tasks/:task_id/history` - List a task's status history
//!
//! The status endpoint attributes the change to the identity resolved from
//! the `X-User-Id` header (see [`crate::identity`]).

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::Json,
    identity::Identity,
    services::tasks::NewTask,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension,
};
use chrono::{DateTime, Utc};
use opsdesk_shared::models::{
    StatusChange, Task, TaskPriority, TaskStatus, TaskStatusHistory, UpdateTask,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Short title
    #[validate(length(min = 2, message = "Title must be at least 2 characters"))]
    pub title: String,

    /// Longer description
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    /// User responsible for the task
    pub assignee_id: Option<Uuid>,

    /// Urgency (defaults to MEDIUM)
    pub priority: Option<TaskPriority>,

    /// Workflow status (defaults to TODO)
    pub status: Option<TaskStatus>,

    /// Deadline
    pub due_date: Option<DateTime<Utc>>,
}

/// Update task request; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[validate(length(min = 2, message = "Title must be at least 2 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    pub assignee_id: Option<Uuid>,

    pub priority: Option<TaskPriority>,

    pub status: Option<TaskStatus>,

    pub due_date: Option<DateTime<Utc>>,
}

/// Status change request
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// New status; any status may follow any other
    pub status: TaskStatus,
}

/// `GET /api/projects/:project_id/tasks`
pub async fn list(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<axum::Json<Vec<Task>>> {
    Ok(axum::Json(state.tasks.list_by_project(project_id).await?))
}

/// `POST /api/projects/:project_id/tasks`
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(payload): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, axum::Json<Task>)> {
    payload.validate()?;

    let task = state
        .tasks
        .create(NewTask {
            project_id,
            title: payload.title,
            description: payload.description,
            assignee_id: payload.assignee_id,
            priority: payload.priority,
            status: payload.status,
            due_date: payload.due_date,
        })
        .await?;

    Ok((StatusCode::CREATED, axum::Json(task)))
}

/// `PUT /api/projects/:project_id/tasks/:task_id`
///
/// The project id from the path wins over any project in the body, so a
/// task can be moved by PUTting it under a different project.
pub async fn update(
    State(state): State<AppState>,
    Path((project_id, task_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateTaskRequest>,
) -> ApiResult<axum::Json<Task>> {
    payload.validate()?;

    state
        .tasks
        .update(
            task_id,
            UpdateTask {
                project_id: Some(project_id),
                title: payload.title,
                description: payload.description,
                assignee_id: payload.assignee_id,
                priority: payload.priority,
                status: payload.status,
                due_date: payload.due_date,
            },
        )
        .await?
        .map(axum::Json)
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))
}

/// `DELETE /api/projects/:project_id/tasks/:task_id`
pub async fn delete(
    State(state): State<AppState>,
    Path((_project_id, task_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    if state.tasks.delete(task_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Task not found".to_string()))
    }
}

/// `PATCH /api/tasks/:task_id/status`
pub async fn update_status(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<UpdateStatusRequest>,
) -> ApiResult<axum::Json<StatusChange>> {
    state
        .tasks
        .update_status(task_id, payload.status, &identity.actor_id())
        .await?
        .map(axum::Json)
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))
}

/// `GET /api/tasks/:task_id/history`
pub async fn list_history(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<axum::Json<Vec<TaskStatusHistory>>> {
    if state.tasks.get_by_id(task_id).await?.is_none() {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }
    Ok(axum::Json(state.tasks.list_status_history(task_id).await?))
}
