//! In-memory user store

use crate::models::{CreateUser, UpdateUser, User};
use crate::repos::{RepoResult, UserRepo};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory `UserRepo`
#[derive(Debug, Default)]
pub struct MemoryUserRepo {
    users: RwLock<Vec<User>>,
}

impl MemoryUserRepo {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn list(&self) -> RepoResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|user| user.id == id)
            .cloned())
    }

    async fn get_first(&self) -> RepoResult<Option<User>> {
        Ok(self.users.read().await.first().cloned())
    }

    async fn create(&self, input: CreateUser) -> RepoResult<User> {
        let user = User {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            role: input.role,
            is_active: input.is_active,
            created_at: Utc::now(),
        };
        self.users.write().await.push(user.clone());
        Ok(user)
    }

    async fn update_role_active(&self, id: Uuid, input: UpdateUser) -> RepoResult<Option<User>> {
        let mut users = self.users.write().await;
        let Some(user) = users.iter_mut().find(|user| user.id == id) else {
            return Ok(None);
        };
        if let Some(role) = input.role {
            user.role = role;
        }
        if let Some(is_active) = input.is_active {
            user.is_active = is_active;
        }
        Ok(Some(user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;

    fn create_input(name: &str) -> CreateUser {
        CreateUser {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            role: UserRole::Member,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamp() {
        let repo = MemoryUserRepo::new();
        let a = repo.create(create_input("Ada")).await.unwrap();
        let b = repo.create(create_input("Grace")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert!(a.created_at <= b.created_at);
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let repo = MemoryUserRepo::new();
        repo.create(create_input("Ada")).await.unwrap();
        repo.create(create_input("Grace")).await.unwrap();
        repo.create(create_input("Edsger")).await.unwrap();

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|user| user.name)
            .collect();
        assert_eq!(names, vec!["Ada", "Grace", "Edsger"]);

        let first = repo.get_first().await.unwrap().unwrap();
        assert_eq!(first.name, "Ada");
    }

    #[tokio::test]
    async fn test_update_missing_user_is_absent_not_error() {
        let repo = MemoryUserRepo::new();
        let result = repo
            .update_role_active(
                Uuid::new_v4(),
                UpdateUser {
                    role: Some(UserRole::Admin),
                    is_active: None,
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let repo = MemoryUserRepo::new();
        let user = repo.create(create_input("Ada")).await.unwrap();

        let updated = repo
            .update_role_active(
                user.id,
                UpdateUser {
                    role: None,
                    is_active: Some(false),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.role, UserRole::Member);
        assert!(!updated.is_active);
        assert_eq!(updated.name, "Ada");
    }
}
