//! Request identity resolution
//!
//! Stand-in for real authentication: the optional `X-User-Id` header selects
//! the acting user for status-change attribution. Without the header the
//! first listed user is used; if the header names an unknown user, or there
//! are no users at all, changes are attributed to the `"system"` sentinel.

use crate::{app::AppState, error::ApiError};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use opsdesk_shared::models::User;
use uuid::Uuid;

/// Header that selects the acting user
pub const USER_ID_HEADER: &str = "x-user-id";

/// Resolved acting user, injected into request extensions
#[derive(Debug, Clone)]
pub struct Identity(pub Option<User>);

impl Identity {
    /// Attribution string for history records: the user's id, or `"system"`
    pub fn actor_id(&self) -> String {
        self.0
            .as_ref()
            .map(|user| user.id.to_string())
            .unwrap_or_else(|| "system".to_string())
    }
}

/// Middleware that resolves the acting user for every API request
pub async fn resolve_identity(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let user = match header {
        // An unknown or unparseable id resolves to no user, not to the
        // first-user fallback
        Some(value) => match Uuid::parse_str(&value) {
            Ok(id) => state.users.get_by_id(id).await?,
            Err(_) => None,
        },
        None => state.users.get_first().await?,
    };

    req.extensions_mut().insert(Identity(user));
    Ok(next.run(req).await)
}
