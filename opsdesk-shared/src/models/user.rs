//! User model
//!
//! Users are the people who work on projects. They can be assigned to tasks,
//! added as project members, and show up in the workload report.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE users (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     name VARCHAR(255) NOT NULL,
//!     email VARCHAR(255) NOT NULL,
//!     role TEXT NOT NULL DEFAULT 'MEMBER',
//!     is_active BOOLEAN NOT NULL DEFAULT TRUE,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role a user holds across the whole workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Full administrative access
    Admin,

    /// Manages clients, projects and task assignments
    Manager,

    /// Regular contributor
    Member,
}

impl UserRole {
    /// Converts the role to its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Manager => "MANAGER",
            UserRole::Member => "MEMBER",
        }
    }
}

/// User account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Workspace role
    pub role: UserRole,

    /// Whether the user is active (inactive users keep their history)
    pub is_active: bool,

    /// When the user was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a user
///
/// Defaults (role, active flag) are applied by the service layer before this
/// reaches a repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    /// Display name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Workspace role
    pub role: UserRole,

    /// Active flag
    pub is_active: bool,
}

/// Partial update for a user (role and active flag only)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    /// New role, if changing
    pub role: Option<UserRole>,

    /// New active flag, if changing
    pub is_active: Option<bool>,
}
