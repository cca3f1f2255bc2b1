//! Task model and status history
//!
//! Tasks are the work items inside a project. Every status change is recorded
//! as one `TaskStatusHistory` row, in call order, regardless of which status
//! follows which; there is no transition validation, the log is
//! unconditional.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE tasks (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     project_id UUID NOT NULL,
//!     title VARCHAR(255) NOT NULL,
//!     description TEXT,
//!     assignee_id UUID,
//!     priority TEXT NOT NULL DEFAULT 'MEDIUM',
//!     status TEXT NOT NULL DEFAULT 'TODO',
//!     due_date TIMESTAMPTZ,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//!
//! CREATE TABLE task_status_history (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     task_id UUID NOT NULL,
//!     from_status TEXT NOT NULL,
//!     to_status TEXT NOT NULL,
//!     changed_by TEXT NOT NULL,
//!     changed_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    /// Converts the priority to its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "LOW",
            TaskPriority::Medium => "MEDIUM",
            TaskPriority::High => "HIGH",
            TaskPriority::Urgent => "URGENT",
        }
    }
}

/// Task workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Not started
    Todo,

    /// Being worked on
    InProgress,

    /// Waiting for review
    Review,

    /// Finished
    Done,

    /// Stuck on something external
    Blocked,
}

impl TaskStatus {
    /// Converts the status to its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Review => "REVIEW",
            TaskStatus::Done => "DONE",
            TaskStatus::Blocked => "BLOCKED",
        }
    }

    /// Whether the task still counts toward someone's workload
    ///
    /// Every status except `Done` is considered active, including `Blocked`.
    pub fn is_active(&self) -> bool {
        !matches!(self, TaskStatus::Done)
    }
}

/// Task record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Project this task belongs to (exactly one)
    pub project_id: Uuid,

    /// Short title
    pub title: String,

    /// Longer description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// User responsible for the task
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<Uuid>,

    /// Urgency
    pub priority: TaskPriority,

    /// Workflow status
    pub status: TaskStatus,

    /// Deadline; tasks without one are never reported overdue
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last modified
    pub updated_at: DateTime<Utc>,
}

/// One entry in a task's append-only status log
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatusHistory {
    /// Unique history entry ID
    pub id: Uuid,

    /// Task the change belongs to
    pub task_id: Uuid,

    /// Status before the change
    pub from_status: TaskStatus,

    /// Status after the change
    pub to_status: TaskStatus,

    /// Acting user's ID, or the literal `"system"` when no user was resolved
    pub changed_by: String,

    /// When the change happened
    pub changed_at: DateTime<Utc>,
}

/// Result of a status update: the mutated task plus the history entry the
/// update appended
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    /// Task after the update
    pub task: Task,

    /// The single history record the update produced
    pub history: TaskStatusHistory,
}

/// Input for creating a task
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    /// Project this task belongs to
    pub project_id: Uuid,

    /// Short title
    pub title: String,

    /// Longer description
    pub description: Option<String>,

    /// User responsible for the task
    pub assignee_id: Option<Uuid>,

    /// Urgency (service defaults this to MEDIUM)
    pub priority: TaskPriority,

    /// Workflow status (service defaults this to TODO)
    pub status: TaskStatus,

    /// Deadline
    pub due_date: Option<DateTime<Utc>>,
}

/// Partial update for a task; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    /// New project, if moving the task
    pub project_id: Option<Uuid>,

    /// New title, if changing
    pub title: Option<String>,

    /// New description, if changing
    pub description: Option<String>,

    /// New assignee, if changing
    pub assignee_id: Option<Uuid>,

    /// New priority, if changing
    pub priority: Option<TaskPriority>,

    /// New status, if changing (bypasses history; use the status endpoint
    /// for attributed changes)
    pub status: Option<TaskStatus>,

    /// New due date, if changing
    pub due_date: Option<DateTime<Utc>>,
}
