//! Task service

use chrono::{DateTime, Utc};
use opsdesk_shared::models::{
    CreateTask, StatusChange, Task, TaskPriority, TaskStatus, TaskStatusHistory, UpdateTask,
};
use opsdesk_shared::repos::{RepoResult, TaskRepo};
use std::sync::Arc;
use uuid::Uuid;

/// Input for creating a task, before defaults are applied
#[derive(Debug, Clone)]
pub struct NewTask {
    pub project_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub assignee_id: Option<Uuid>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Orchestrates task operations on top of a `TaskRepo`
#[derive(Clone)]
pub struct TasksService {
    repo: Arc<dyn TaskRepo>,
}

impl TasksService {
    pub fn new(repo: Arc<dyn TaskRepo>) -> Self {
        Self { repo }
    }

    pub async fn list_by_project(&self, project_id: Uuid) -> RepoResult<Vec<Task>> {
        self.repo.list_by_project(project_id).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> RepoResult<Option<Task>> {
        self.repo.get_by_id(id).await
    }

    /// Creates a task; priority defaults to MEDIUM, status to TODO
    pub async fn create(&self, input: NewTask) -> RepoResult<Task> {
        self.repo
            .create(CreateTask {
                project_id: input.project_id,
                title: input.title,
                description: input.description,
                assignee_id: input.assignee_id,
                priority: input.priority.unwrap_or(TaskPriority::Medium),
                status: input.status.unwrap_or(TaskStatus::Todo),
                due_date: input.due_date,
            })
            .await
    }

    pub async fn update(&self, id: Uuid, input: UpdateTask) -> RepoResult<Option<Task>> {
        self.repo.update(id, input).await
    }

    /// Deletes the task along with its status history
    pub async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        self.repo.delete(id).await
    }

    /// Sets the status and appends exactly one attributed history record
    pub async fn update_status(
        &self,
        id: Uuid,
        to_status: TaskStatus,
        changed_by: &str,
    ) -> RepoResult<Option<StatusChange>> {
        self.repo.update_status(id, to_status, changed_by).await
    }

    pub async fn list_status_history(&self, task_id: Uuid) -> RepoResult<Vec<TaskStatusHistory>> {
        self.repo.list_status_history(task_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opsdesk_shared::repos::memory::MemoryTaskRepo;

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let service = TasksService::new(Arc::new(MemoryTaskRepo::new()));
        let task = service
            .create(NewTask {
                project_id: Uuid::new_v4(),
                title: "Gather requirements".to_string(),
                description: None,
                assignee_id: None,
                priority: None,
                status: None,
                due_date: None,
            })
            .await
            .unwrap();

        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.status, TaskStatus::Todo);
    }
}
