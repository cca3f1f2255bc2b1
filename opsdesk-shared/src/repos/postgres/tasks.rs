//! PostgreSQL-backed task store, including status history

use crate::models::{CreateTask, StatusChange, Task, TaskStatus, TaskStatusHistory, UpdateTask};
use crate::repos::{RepoResult, TaskRepo};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

const TASK_COLUMNS: &str = "id, project_id, title, description, assignee_id, \
                            priority, status, due_date, created_at, updated_at";

/// `TaskRepo` backed by the `tasks` and `task_status_history` tables
#[derive(Debug, Clone)]
pub struct PgTaskRepo {
    pool: PgPool,
}

impl PgTaskRepo {
    /// Creates a store on top of an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepo for PgTaskRepo {
    async fn list_by_project(&self, project_id: Uuid) -> RepoResult<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE project_id = $1 ORDER BY created_at"
        ))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn get_by_id(&self, id: Uuid) -> RepoResult<Option<Task>> {
        let task =
            sqlx::query_as::<_, Task>(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(task)
    }

    async fn create(&self, input: CreateTask) -> RepoResult<Task> {
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            INSERT INTO tasks (project_id, title, description, assignee_id, priority, status, due_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(input.project_id)
        .bind(input.title)
        .bind(input.description)
        .bind(input.assignee_id)
        .bind(input.priority)
        .bind(input.status)
        .bind(input.due_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    async fn update(&self, id: Uuid, input: UpdateTask) -> RepoResult<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            UPDATE tasks
            SET project_id = COALESCE($2, project_id),
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                assignee_id = COALESCE($5, assignee_id),
                priority = COALESCE($6, priority),
                status = COALESCE($7, status),
                due_date = COALESCE($8, due_date),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(input.project_id)
        .bind(input.title)
        .bind(input.description)
        .bind(input.assignee_id)
        .bind(input.priority)
        .bind(input.status)
        .bind(input.due_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        // One transaction so history can never outlive its task
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM task_status_history WHERE task_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
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

    async fn update_status(
        &self,
        id: Uuid,
        to_status: TaskStatus,
        changed_by: &str,
    ) -> RepoResult<Option<StatusChange>> {
        // One transaction: the status mutation and its history record either
        // both land or neither does.
        let mut tx = self.pool.begin().await?;

        let from_status: Option<TaskStatus> =
            sqlx::query_scalar("SELECT status FROM tasks WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(from_status) = from_status else {
            tx.rollback().await?;
            return Ok(None);
        };

        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            UPDATE tasks
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(to_status)
        .fetch_one(&mut *tx)
        .await?;

        let history = sqlx::query_as::<_, TaskStatusHistory>(
            r#"
            INSERT INTO task_status_history (task_id, from_status, to_status, changed_by)
            VALUES ($1, $2, $3, $4)
            RETURNING id, task_id, from_status, to_status, changed_by, changed_at
            "#,
        )
        .bind(id)
        .bind(from_status)
        .bind(to_status)
        .bind(changed_by)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(StatusChange { task, history }))
    }

    async fn list_status_history(&self, task_id: Uuid) -> RepoResult<Vec<TaskStatusHistory>> {
        let history = sqlx::query_as::<_, TaskStatusHistory>(
            r#"
            SELECT id, task_id, from_status, to_status, changed_by, changed_at
            FROM task_status_history
            WHERE task_id = $1
            ORDER BY changed_at, id
            "#,
        )
        .bind(task_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(history)
    }
}
