//! PostgreSQL-backed project store, including project memberships

use crate::models::{AddProjectMember, CreateProject, Project, ProjectMember, UpdateProject};
use crate::repos::{ProjectRepo, RepoResult};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// `ProjectRepo` backed by the `projects` and `project_members` tables
#[derive(Debug, Clone)]
pub struct PgProjectRepo {
    pool: PgPool,
}

impl PgProjectRepo {
    /// Creates a store on top of an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepo for PgProjectRepo {
    async fn list(&self) -> RepoResult<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, client_id, name, description, status, budget,
                   start_date, due_date, created_at
            FROM projects
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn get_by_id(&self, id: Uuid) -> RepoResult<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, client_id, name, description, status, budget,
                   start_date, due_date, created_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn create(&self, input: CreateProject) -> RepoResult<Project> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (client_id, name, description, status, budget, start_date, due_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, client_id, name, description, status, budget,
                      start_date, due_date, created_at
            "#,
        )
        .bind(input.client_id)
        .bind(input.name)
        .bind(input.description)
        .bind(input.status)
        .bind(input.budget)
        .bind(input.start_date)
        .bind(input.due_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(project)
    }

    async fn update(&self, id: Uuid, input: UpdateProject) -> RepoResult<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET client_id = COALESCE($2, client_id),
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                status = COALESCE($5, status),
                budget = COALESCE($6, budget),
                start_date = COALESCE($7, start_date),
                due_date = COALESCE($8, due_date)
            WHERE id = $1
            RETURNING id, client_id, name, description, status, budget,
                      start_date, due_date, created_at
            "#,
        )
        .bind(id)
        .bind(input.client_id)
        .bind(input.name)
        .bind(input.description)
        .bind(input.status)
        .bind(input.budget)
        .bind(input.start_date)
        .bind(input.due_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        // One transaction so members can never outlive their project
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM project_members WHERE project_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn list_members(&self, project_id: Uuid) -> RepoResult<Vec<ProjectMember>> {
        let members = sqlx::query_as::<_, ProjectMember>(
            r#"
            SELECT project_id, user_id, member_role
            FROM project_members
            WHERE project_id = $1
            ORDER BY added_at
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    async fn add_member(&self, input: AddProjectMember) -> RepoResult<ProjectMember> {
        let inserted = sqlx::query_as::<_, ProjectMember>(
            r#"
            INSERT INTO project_members (project_id, user_id, member_role)
            VALUES ($1, $2, $3)
            ON CONFLICT (project_id, user_id) DO NOTHING
            RETURNING project_id, user_id, member_role
            "#,
        )
        .bind(input.project_id)
        .bind(input.user_id)
        .bind(input.member_role)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(member) = inserted {
            return Ok(member);
        }

        // Conflict: the pair already exists, return the stored row unchanged
        let existing = sqlx::query_as::<_, ProjectMember>(
            r#"
            SELECT project_id, user_id, member_role
            FROM project_members
            WHERE project_id = $1 AND user_id = $2
            "#,
        )
        .bind(input.project_id)
        .bind(input.user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(existing)
    }

    async fn remove_member(&self, project_id: Uuid, user_id: Uuid) -> RepoResult<bool> {
        let result =
            sqlx::query("DELETE FROM project_members WHERE project_id = $1 AND user_id = $2")
                .bind(project_id)
                .bind(user_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
