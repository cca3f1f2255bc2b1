//! Repository abstraction
//!
//! One trait per entity, with two interchangeable implementations each:
//!
//! - `memory`: map-backed stores used when no database is configured
//! - `postgres`: sqlx-backed stores for the remote relational backend
//!
//! Callers depend only on the traits; the concrete implementation is chosen
//! once at process startup. Missing ids are reported as `Ok(None)` /
//! `Ok(false)`, never as errors; the HTTP layer turns absence into 404.
//!
//! # Example
//!
//! ```
//! use opsdesk_shared::models::{CreateUser, UserRole};
//! use opsdesk_shared::repos::{memory::MemoryUserRepo, UserRepo};
//!
//! # async fn example() -> Result<(), opsdesk_shared::repos::RepoError> {
//! let repo = MemoryUserRepo::new();
//! let user = repo
//!     .create(CreateUser {
//!         name: "Ada".to_string(),
//!         email: "ada@example.com".to_string(),
//!         role: UserRole::Member,
//!         is_active: true,
//!     })
//!     .await?;
//! assert!(repo.get_by_id(user.id).await?.is_some());
//! # Ok(())
//! # }
//! ```

pub mod memory;
pub mod postgres;

use crate::models::{
    AddProjectMember, Client, CreateClient, CreateProject, CreateTask, CreateUser, Project,
    ProjectMember, StatusChange, Task, TaskStatus, TaskStatusHistory, UpdateClient, UpdateProject,
    UpdateTask, UpdateUser, User,
};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Errors a repository can signal
///
/// Validation never fails here (it happens upstream in the HTTP layer); the
/// only failures are an unreachable or misconfigured store.
#[derive(Debug, Error)]
pub enum RepoError {
    /// The backing store is not configured or cannot be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The backing database rejected or failed an operation
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Repository result type alias
pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence operations for users
#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Lists all users in creation order
    async fn list(&self) -> RepoResult<Vec<User>>;

    /// Looks a user up by id
    async fn get_by_id(&self, id: Uuid) -> RepoResult<Option<User>>;

    /// Returns the earliest-created user, used as the identity fallback
    async fn get_first(&self) -> RepoResult<Option<User>>;

    /// Creates a user, assigning id and creation timestamp
    async fn create(&self, input: CreateUser) -> RepoResult<User>;

    /// Updates role and/or active flag; `None` if the user does not exist
    async fn update_role_active(&self, id: Uuid, input: UpdateUser) -> RepoResult<Option<User>>;
}

/// Persistence operations for clients
#[async_trait]
pub trait ClientRepo: Send + Sync {
    /// Lists all clients in creation order
    async fn list(&self) -> RepoResult<Vec<Client>>;

    /// Looks a client up by id
    async fn get_by_id(&self, id: Uuid) -> RepoResult<Option<Client>>;

    /// Creates a client, assigning id and creation timestamp
    async fn create(&self, input: CreateClient) -> RepoResult<Client>;

    /// Applies a partial update; `None` if the client does not exist
    async fn update(&self, id: Uuid, input: UpdateClient) -> RepoResult<Option<Client>>;

    /// Deletes a client; `false` if it did not exist
    async fn delete(&self, id: Uuid) -> RepoResult<bool>;
}

/// Persistence operations for projects and their memberships
#[async_trait]
pub trait ProjectRepo: Send + Sync {
    /// Lists all projects in creation order
    async fn list(&self) -> RepoResult<Vec<Project>>;

    /// Looks a project up by id
    async fn get_by_id(&self, id: Uuid) -> RepoResult<Option<Project>>;

    /// Creates a project, assigning id and creation timestamp
    async fn create(&self, input: CreateProject) -> RepoResult<Project>;

    /// Applies a partial update; `None` if the project does not exist
    async fn update(&self, id: Uuid, input: UpdateProject) -> RepoResult<Option<Project>>;

    /// Deletes a project and all of its membership rows as one atomic
    /// operation; `false` if the project did not exist
    async fn delete(&self, id: Uuid) -> RepoResult<bool>;

    /// Lists a project's members in the order they were added
    async fn list_members(&self, project_id: Uuid) -> RepoResult<Vec<ProjectMember>>;

    /// Adds a member; adding an existing (project, user) pair is a no-op
    /// that returns the existing row unchanged
    async fn add_member(&self, input: AddProjectMember) -> RepoResult<ProjectMember>;

    /// Removes a member; `false` if the pair was not present
    async fn remove_member(&self, project_id: Uuid, user_id: Uuid) -> RepoResult<bool>;
}

/// Persistence operations for tasks and their status history
#[async_trait]
pub trait TaskRepo: Send + Sync {
    /// Lists a project's tasks in creation order
    async fn list_by_project(&self, project_id: Uuid) -> RepoResult<Vec<Task>>;

    /// Looks a task up by id
    async fn get_by_id(&self, id: Uuid) -> RepoResult<Option<Task>>;

    /// Creates a task, assigning id and timestamps
    async fn create(&self, input: CreateTask) -> RepoResult<Task>;

    /// Applies a partial update and stamps `updated_at`; `None` if the task
    /// does not exist
    async fn update(&self, id: Uuid, input: UpdateTask) -> RepoResult<Option<Task>>;

    /// Deletes a task and all of its status history; `false` if the task
    /// did not exist
    async fn delete(&self, id: Uuid) -> RepoResult<bool>;

    /// Sets the task's status and appends exactly one history record
    /// capturing the prior status, the new status and the acting user;
    /// `None` if the task does not exist
    async fn update_status(
        &self,
        id: Uuid,
        to_status: TaskStatus,
        changed_by: &str,
    ) -> RepoResult<Option<StatusChange>>;

    /// Lists a task's status history in insertion order
    async fn list_status_history(&self, task_id: Uuid) -> RepoResult<Vec<TaskStatusHistory>>;
}
