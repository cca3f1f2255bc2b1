//! Client model
//!
//! Clients are the customers projects are delivered for. A client owns zero
//! or more projects via `Project::client_id`.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE clients (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     name VARCHAR(255) NOT NULL,
//!     email VARCHAR(255),
//!     phone VARCHAR(50),
//!     notes TEXT,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Client (customer) record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Unique client ID
    pub id: Uuid,

    /// Company or contact name
    pub name: String,

    /// Contact email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Contact phone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Free-form notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// When the client was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClient {
    /// Company or contact name
    pub name: String,

    /// Contact email (an empty string is normalized to absent upstream)
    pub email: Option<String>,

    /// Contact phone
    pub phone: Option<String>,

    /// Free-form notes
    pub notes: Option<String>,
}

/// Partial update for a client; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClient {
    /// New name, if changing
    pub name: Option<String>,

    /// New email, if changing
    pub email: Option<String>,

    /// New phone, if changing
    pub phone: Option<String>,

    /// New notes, if changing
    pub notes: Option<String>,
}
