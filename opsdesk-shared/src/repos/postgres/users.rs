//! PostgreSQL-backed user store

use crate::models::{CreateUser, UpdateUser, User};
use crate::repos::{RepoResult, UserRepo};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// `UserRepo` backed by the `users` table
#[derive(Debug, Clone)]
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    /// Creates a store on top of an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn list(&self) -> RepoResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, role, is_active, created_at
            FROM users
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn get_by_id(&self, id: Uuid) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, role, is_active, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn get_first(&self) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, role, is_active, created_at
            FROM users
            ORDER BY created_at
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, input: CreateUser) -> RepoResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, role, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, role, is_active, created_at
            "#,
        )
        .bind(input.name)
        .bind(input.email)
        .bind(input.role)
        .bind(input.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update_role_active(&self, id: Uuid, input: UpdateUser) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET role = COALESCE($2, role),
                is_active = COALESCE($3, is_active)
            WHERE id = $1
            RETURNING id, name, email, role, is_active, created_at
            "#,
        )
        .bind(id)
        .bind(input.role)
        .bind(input.is_active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
