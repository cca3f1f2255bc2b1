//! Project and project membership models
//!
//! A project belongs to exactly one client and carries a status, optional
//! budget and optional start/due dates. Users are attached to projects
//! through `ProjectMember` rows keyed by the (project, user) pair.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE projects (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     client_id UUID NOT NULL,
//!     name VARCHAR(255) NOT NULL,
//!     description TEXT,
//!     status TEXT NOT NULL DEFAULT 'PLANNED',
//!     budget DOUBLE PRECISION,
//!     start_date TIMESTAMPTZ,
//!     due_date TIMESTAMPTZ,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//!
//! CREATE TABLE project_members (
//!     project_id UUID NOT NULL,
//!     user_id UUID NOT NULL,
//!     member_role TEXT NOT NULL DEFAULT 'CONTRIBUTOR',
//!     added_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     PRIMARY KEY (project_id, user_id)
//! );
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    /// Agreed but not started
    Planned,

    /// Work in progress
    Active,

    /// Paused, waiting on the client or on resources
    OnHold,

    /// Delivered
    Done,

    /// Abandoned
    Cancelled,
}

impl ProjectStatus {
    /// Converts the status to its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planned => "PLANNED",
            ProjectStatus::Active => "ACTIVE",
            ProjectStatus::OnHold => "ON_HOLD",
            ProjectStatus::Done => "DONE",
            ProjectStatus::Cancelled => "CANCELLED",
        }
    }
}

/// A user's role within one specific project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectMemberRole {
    /// Accountable for the project
    Owner,

    /// Coordinates the work
    Manager,

    /// Does the work
    Contributor,
}

/// Project record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique project ID
    pub id: Uuid,

    /// Client this project is delivered for
    pub client_id: Uuid,

    /// Project name
    pub name: String,

    /// Longer description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Lifecycle status
    pub status: ProjectStatus,

    /// Budget in workspace currency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,

    /// Planned start
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,

    /// Deadline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    /// When the project was created
    pub created_at: DateTime<Utc>,
}

/// Membership row linking a user to a project
///
/// The (project_id, user_id) pair is unique; adding the same pair twice
/// returns the existing row unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMember {
    /// Project ID
    pub project_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Role within this project
    pub member_role: ProjectMemberRole,
}

/// Input for creating a project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    /// Owning client
    pub client_id: Uuid,

    /// Project name
    pub name: String,

    /// Longer description
    pub description: Option<String>,

    /// Lifecycle status (service defaults this to PLANNED)
    pub status: ProjectStatus,

    /// Budget in workspace currency
    pub budget: Option<f64>,

    /// Planned start
    pub start_date: Option<DateTime<Utc>>,

    /// Deadline
    pub due_date: Option<DateTime<Utc>>,
}

/// Partial update for a project; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    /// New owning client, if changing
    pub client_id: Option<Uuid>,

    /// New name, if changing
    pub name: Option<String>,

    /// New description, if changing
    pub description: Option<String>,

    /// New status, if changing
    pub status: Option<ProjectStatus>,

    /// New budget, if changing
    pub budget: Option<f64>,

    /// New start date, if changing
    pub start_date: Option<DateTime<Utc>>,

    /// New due date, if changing
    pub due_date: Option<DateTime<Utc>>,
}

/// Input for attaching a user to a project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProjectMember {
    /// Project ID
    pub project_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Role within this project (service defaults this to CONTRIBUTOR)
    pub member_role: ProjectMemberRole,
}
