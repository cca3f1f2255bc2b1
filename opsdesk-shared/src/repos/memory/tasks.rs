//! In-memory task store, including status history

use crate::models::{CreateTask, StatusChange, Task, TaskStatus, TaskStatusHistory, UpdateTask};
use crate::repos::{RepoResult, TaskRepo};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
struct State {
    tasks: Vec<Task>,
    history: Vec<TaskStatusHistory>,
}

/// In-memory `TaskRepo`
///
/// History lives next to the tasks so that a status update mutates the task
/// and appends its history record under one write lock.
#[derive(Debug, Default)]
pub struct MemoryTaskRepo {
    state: RwLock<State>,
}

impl MemoryTaskRepo {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepo for MemoryTaskRepo {
    async fn list_by_project(&self, project_id: Uuid) -> RepoResult<Vec<Task>> {
        Ok(self
            .state
            .read()
            .await
            .tasks
            .iter()
            .filter(|task| task.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: Uuid) -> RepoResult<Option<Task>> {
        Ok(self
            .state
            .read()
            .await
            .tasks
            .iter()
            .find(|task| task.id == id)
            .cloned())
    }

    async fn create(&self, input: CreateTask) -> RepoResult<Task> {
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            project_id: input.project_id,
            title: input.title,
            description: input.description,
            assignee_id: input.assignee_id,
            priority: input.priority,
            status: input.status,
            due_date: input.due_date,
            created_at: now,
            updated_at: now,
        };
        self.state.write().await.tasks.push(task.clone());
        Ok(task)
    }

    async fn update(&self, id: Uuid, input: UpdateTask) -> RepoResult<Option<Task>> {
        let mut state = self.state.write().await;
        let Some(task) = state.tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(None);
        };
        if let Some(project_id) = input.project_id {
            task.project_id = project_id;
        }
        if let Some(title) = input.title {
            task.title = title;
        }
        if let Some(description) = input.description {
            task.description = Some(description);
        }
        if let Some(assignee_id) = input.assignee_id {
            task.assignee_id = Some(assignee_id);
        }
        if let Some(priority) = input.priority {
            task.priority = priority;
        }
        if let Some(status) = input.status {
            task.status = status;
        }
        if let Some(due_date) = input.due_date {
            task.due_date = Some(due_date);
        }
        task.updated_at = Utc::now();
        Ok(Some(task.clone()))
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let mut state = self.state.write().await;
        let before = state.tasks.len();
        state.tasks.retain(|task| task.id != id);
        if state.tasks.len() == before {
            return Ok(false);
        }
        state.history.retain(|record| record.task_id != id);
        Ok(true)
    }

    async fn update_status(
        &self,
        id: Uuid,
        to_status: TaskStatus,
        changed_by: &str,
    ) -> RepoResult<Option<StatusChange>> {
        let mut state = self.state.write().await;
        let Some(task) = state.tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(None);
        };
        let from_status = task.status;
        let now = Utc::now();
        task.status = to_status;
        task.updated_at = now;
        let task = task.clone();

        let history = TaskStatusHistory {
            id: Uuid::new_v4(),
            task_id: id,
            from_status,
            to_status,
            changed_by: changed_by.to_string(),
            changed_at: now,
        };
        state.history.push(history.clone());

        Ok(Some(StatusChange { task, history }))
    }

    async fn list_status_history(&self, task_id: Uuid) -> RepoResult<Vec<TaskStatusHistory>> {
        Ok(self
            .state
            .read()
            .await
            .history
            .iter()
            .filter(|record| record.task_id == task_id)
            .cloned()
            .collect())
    }
}
