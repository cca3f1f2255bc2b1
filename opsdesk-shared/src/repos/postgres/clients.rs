//! PostgreSQL-backed client store

use crate::models::{Client, CreateClient, UpdateClient};
use crate::repos::{ClientRepo, RepoResult};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// `ClientRepo` backed by the `clients` table
#[derive(Debug, Clone)]
pub struct PgClientRepo {
    pool: PgPool,
}

impl PgClientRepo {
    /// Creates a store on top of an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepo for PgClientRepo {
    async fn list(&self) -> RepoResult<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, name, email, phone, notes, created_at
            FROM clients
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    async fn get_by_id(&self, id: Uuid) -> RepoResult<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, name, email, phone, notes, created_at
            FROM clients
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    async fn create(&self, input: CreateClient) -> RepoResult<Client> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (name, email, phone, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, phone, notes, created_at
            "#,
        )
        .bind(input.name)
        .bind(input.email)
        .bind(input.phone)
        .bind(input.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(client)
    }

    async fn update(&self, id: Uuid, input: UpdateClient) -> RepoResult<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                notes = COALESCE($5, notes)
            WHERE id = $1
            RETURNING id, name, email, phone, notes, created_at
            "#,
        )
        .bind(id)
        .bind(input.name)
        .bind(input.email)
        .bind(input.phone)
        .bind(input.notes)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
