//! Domain models for OpsDesk
//!
//! This module contains the entities managed by the API along with their
//! creation/update input types.
//!
//! # Models
//!
//! - `user`: Team members who can be assigned to projects and tasks
//! - `client`: Customers that projects are delivered for
//! - `project`: Client engagements with status, budget and deadlines
//! - `task`: Work items within a project, with an append-only status history
//!
//! All models serialize to camelCase JSON; enum values are
//! SCREAMING_SNAKE_CASE on the wire (e.g. `IN_PROGRESS`).

pub mod client;
pub mod project;
pub mod task;
pub mod user;

pub use client::{Client, CreateClient, UpdateClient};
pub use project::{
    AddProjectMember, CreateProject, Project, ProjectMember, ProjectMemberRole, ProjectStatus,
    UpdateProject,
};
pub use task::{
    CreateTask, StatusChange, Task, TaskPriority, TaskStatus, TaskStatusHistory, UpdateTask,
};
pub use user::{CreateUser, UpdateUser, User, UserRole};
