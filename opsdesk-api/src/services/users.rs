//! User service

use opsdesk_shared::models::{CreateUser, UpdateUser, User, UserRole};
use opsdesk_shared::repos::{RepoResult, UserRepo};
use std::sync::Arc;
use uuid::Uuid;

/// Input for creating a user, before defaults are applied
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

/// Orchestrates user operations on top of a `UserRepo`
#[derive(Clone)]
pub struct UsersService {
    repo: Arc<dyn UserRepo>,
}

impl UsersService {
    pub fn new(repo: Arc<dyn UserRepo>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> RepoResult<Vec<User>> {
        self.repo.list().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> RepoResult<Option<User>> {
        self.repo.get_by_id(id).await
    }

    /// Earliest-created user; identity fallback when no header is sent
    pub async fn get_first(&self) -> RepoResult<Option<User>> {
        self.repo.get_first().await
    }

    /// Creates a user; role defaults to MEMBER, active flag to true
    pub async fn create(&self, input: NewUser) -> RepoResult<User> {
        self.repo
            .create(CreateUser {
                name: input.name,
                email: input.email,
                role: input.role.unwrap_or(UserRole::Member),
                is_active: input.is_active.unwrap_or(true),
            })
            .await
    }

    pub async fn update_role_active(&self, id: Uuid, input: UpdateUser) -> RepoResult<Option<User>> {
        self.repo.update_role_active(id, input).await
    }
}
