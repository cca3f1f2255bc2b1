//! Reporting service
//!
//! The only service that reads across repositories. All three reports are
//! pure functions of the current repository contents, recomputed on every
//! call; nothing is cached.
//!
//! A task is "overdue" iff it has a due date, the due date is strictly
//! before `now - days`, and its status is not DONE. `days` acts as a grace
//! window: `days = 0` flags everything already past due at the current
//! instant.

use chrono::{DateTime, Duration, Utc};
use opsdesk_shared::models::{ProjectStatus, TaskStatus};
use opsdesk_shared::repos::{ProjectRepo, RepoResult, TaskRepo, UserRepo};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// One overdue task in the overdue-tasks report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverdueTaskItem {
    pub task_id: Uuid,
    pub title: String,
    pub project_id: Uuid,
    pub due_date: DateTime<Utc>,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<Uuid>,
}

/// One user row in the workload report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadItem {
    pub user_id: Uuid,
    pub user_name: String,
    /// Assigned tasks whose status is TODO, IN_PROGRESS, REVIEW or BLOCKED
    pub active_tasks: usize,
}

/// One project row in the project-health report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectHealthItem {
    pub project_id: Uuid,
    pub project_name: String,
    pub project_status: ProjectStatus,
    pub total_tasks: usize,
    pub done_tasks: usize,
    pub overdue_tasks: usize,
}

/// Read-only aggregate views over users, projects and tasks
#[derive(Clone)]
pub struct ReportsService {
    users: Arc<dyn UserRepo>,
    projects: Arc<dyn ProjectRepo>,
    tasks: Arc<dyn TaskRepo>,
}

/// Overdue threshold for a grace window of `days` days
///
/// A window too large to represent yields the earliest representable
/// instant; no due date precedes it, so an oversized window reports nothing
/// rather than overflowing.
fn overdue_threshold(days: i64) -> DateTime<Utc> {
    Duration::try_days(days)
        .and_then(|window| Utc::now().checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

impl ReportsService {
    pub fn new(
        users: Arc<dyn UserRepo>,
        projects: Arc<dyn ProjectRepo>,
        tasks: Arc<dyn TaskRepo>,
    ) -> Self {
        Self {
            users,
            projects,
            tasks,
        }
    }

    /// Flat list of overdue tasks across all projects
    ///
    /// Ordered by project listing order, then task insertion order within
    /// each project. Tasks without a due date never appear.
    pub async fn overdue_tasks(&self, days: i64) -> RepoResult<Vec<OverdueTaskItem>> {
        let threshold = overdue_threshold(days);
        let projects = self.projects.list().await?;

        let mut items = Vec::new();
        for project in projects {
            for task in self.tasks.list_by_project(project.id).await? {
                let Some(due_date) = task.due_date else {
                    continue;
                };
                if due_date < threshold && task.status != TaskStatus::Done {
                    items.push(OverdueTaskItem {
                        task_id: task.id,
                        title: task.title,
                        project_id: project.id,
                        due_date,
                        status: task.status,
                        assignee_id: task.assignee_id,
                    });
                }
            }
        }
        Ok(items)
    }

    /// Active-task count per user, in user listing order
    ///
    /// Users with no assigned active tasks still appear, with a count of 0.
    /// DONE tasks never count.
    pub async fn workload(&self) -> RepoResult<Vec<WorkloadItem>> {
        let users = self.users.list().await?;
        let projects = self.projects.list().await?;

        let mut counts: HashMap<Uuid, usize> = HashMap::new();
        for project in projects {
            for task in self.tasks.list_by_project(project.id).await? {
                let Some(assignee_id) = task.assignee_id else {
                    continue;
                };
                if task.status.is_active() {
                    *counts.entry(assignee_id).or_insert(0) += 1;
                }
            }
        }

        Ok(users
            .into_iter()
            .map(|user| WorkloadItem {
                active_tasks: counts.get(&user.id).copied().unwrap_or(0),
                user_id: user.id,
                user_name: user.name,
            })
            .collect())
    }

    /// Per-project task totals, in project listing order
    ///
    /// Uses the same overdue threshold rule as [`Self::overdue_tasks`].
    pub async fn project_health(&self, days: i64) -> RepoResult<Vec<ProjectHealthItem>> {
        let threshold = overdue_threshold(days);
        let projects = self.projects.list().await?;

        let mut items = Vec::new();
        for project in projects {
            let tasks = self.tasks.list_by_project(project.id).await?;
            let total_tasks = tasks.len();
            let done_tasks = tasks
                .iter()
                .filter(|task| task.status == TaskStatus::Done)
                .count();
            let overdue_tasks = tasks
                .iter()
                .filter(|task| match task.due_date {
                    Some(due_date) => due_date < threshold && task.status != TaskStatus::Done,
                    None => false,
                })
                .count();
            items.push(ProjectHealthItem {
                project_id: project.id,
                project_name: project.name,
                project_status: project.status,
                total_tasks,
                done_tasks,
                overdue_tasks,
            });
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opsdesk_shared::models::{
        CreateProject, CreateTask, CreateUser, Project, TaskPriority, User, UserRole,
    };
    use opsdesk_shared::repos::memory::{MemoryProjectRepo, MemoryTaskRepo, MemoryUserRepo};

    struct Fixture {
        users: Arc<MemoryUserRepo>,
        projects: Arc<MemoryProjectRepo>,
        tasks: Arc<MemoryTaskRepo>,
        service: ReportsService,
    }

    impl Fixture {
        fn new() -> Self {
            let users = Arc::new(MemoryUserRepo::new());
            let projects = Arc::new(MemoryProjectRepo::new());
            let tasks = Arc::new(MemoryTaskRepo::new());
            let service = ReportsService::new(users.clone(), projects.clone(), tasks.clone());
            Self {
                users,
                projects,
                tasks,
                service,
            }
        }

        async fn user(&self, name: &str) -> User {
            self.users
                .create(CreateUser {
                    name: name.to_string(),
                    email: format!("{}@example.com", name.to_lowercase()),
                    role: UserRole::Member,
                    is_active: true,
                })
                .await
                .unwrap()
        }

        async fn project(&self, name: &str) -> Project {
            self.projects
                .create(CreateProject {
                    client_id: Uuid::new_v4(),
                    name: name.to_string(),
                    description: None,
                    status: ProjectStatus::Active,
                    budget: None,
                    start_date: None,
                    due_date: None,
                })
                .await
                .unwrap()
        }

        async fn task(
            &self,
            project_id: Uuid,
            title: &str,
            assignee_id: Option<Uuid>,
            status: TaskStatus,
            due_date: Option<DateTime<Utc>>,
        ) {
            self.tasks
                .create(CreateTask {
                    project_id,
                    title: title.to_string(),
                    description: None,
                    assignee_id,
                    priority: TaskPriority::Medium,
                    status,
                    due_date,
                })
                .await
                .unwrap();
        }
    }

    fn days_ago(days: i64) -> DateTime<Utc> {
        Utc::now() - Duration::days(days)
    }

    #[tokio::test]
    async fn test_overdue_includes_past_due_non_done_only() {
        let fx = Fixture::new();
        let project = fx.project("CRM").await;

        fx.task(project.id, "late", None, TaskStatus::Todo, Some(days_ago(2)))
            .await;
        fx.task(
            project.id,
            "late but done",
            None,
            TaskStatus::Done,
            Some(days_ago(2)),
        )
        .await;
        fx.task(project.id, "no deadline", None, TaskStatus::Blocked, None)
            .await;
        fx.task(
            project.id,
            "future",
            None,
            TaskStatus::Todo,
            Some(Utc::now() + Duration::days(3)),
        )
        .await;

        let items = fx.service.overdue_tasks(0).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "late");
        assert_eq!(items[0].project_id, project.id);
    }

    #[tokio::test]
    async fn test_overdue_grace_window_excludes_recent() {
        let fx = Fixture::new();
        let project = fx.project("CRM").await;
        fx.task(
            project.id,
            "two days late",
            None,
            TaskStatus::Todo,
            Some(days_ago(2)),
        )
        .await;

        // With a 7-day grace window the task is not yet flagged
        assert!(fx.service.overdue_tasks(7).await.unwrap().is_empty());
        assert_eq!(fx.service.overdue_tasks(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_oversized_grace_window_reports_nothing() {
        let fx = Fixture::new();
        let project = fx.project("CRM").await;
        fx.task(project.id, "late", None, TaskStatus::Todo, Some(days_ago(2)))
            .await;

        // Windows past chrono's Duration range must not blow up; they
        // behave as "older than any due date", so nothing is overdue
        assert!(fx.service.overdue_tasks(i64::MAX).await.unwrap().is_empty());
        assert!(fx
            .service
            .overdue_tasks(1_000_000_000_000_000_000)
            .await
            .unwrap()
            .is_empty());

        let health = fx.service.project_health(i64::MAX).await.unwrap();
        assert_eq!(health[0].total_tasks, 1);
        assert_eq!(health[0].overdue_tasks, 0);
    }

    #[tokio::test]
    async fn test_overdue_orders_by_project_then_task() {
        let fx = Fixture::new();
        let first = fx.project("first").await;
        let second = fx.project("second").await;

        fx.task(second.id, "b1", None, TaskStatus::Todo, Some(days_ago(1)))
            .await;
        fx.task(first.id, "a1", None, TaskStatus::Todo, Some(days_ago(1)))
            .await;
        fx.task(first.id, "a2", None, TaskStatus::Todo, Some(days_ago(1)))
            .await;

        let titles: Vec<String> = fx
            .service
            .overdue_tasks(0)
            .await
            .unwrap()
            .into_iter()
            .map(|item| item.title)
            .collect();
        assert_eq!(titles, vec!["a1", "a2", "b1"]);
    }

    #[tokio::test]
    async fn test_workload_zero_count_users_appear() {
        let fx = Fixture::new();
        let busy = fx.user("Busy").await;
        let idle = fx.user("Idle").await;
        let project = fx.project("CRM").await;

        fx.task(project.id, "t1", Some(busy.id), TaskStatus::Todo, None)
            .await;
        fx.task(
            project.id,
            "t2",
            Some(busy.id),
            TaskStatus::InProgress,
            None,
        )
        .await;
        fx.task(project.id, "t3", Some(busy.id), TaskStatus::Done, None)
            .await;

        let items = fx.service.workload().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].user_id, busy.id);
        assert_eq!(items[0].active_tasks, 2);
        assert_eq!(items[1].user_id, idle.id);
        assert_eq!(items[1].active_tasks, 0);
    }

    #[tokio::test]
    async fn test_workload_counts_blocked_and_review() {
        let fx = Fixture::new();
        let user = fx.user("Ada").await;
        let project = fx.project("CRM").await;

        fx.task(project.id, "t1", Some(user.id), TaskStatus::Blocked, None)
            .await;
        fx.task(project.id, "t2", Some(user.id), TaskStatus::Review, None)
            .await;

        let items = fx.service.workload().await.unwrap();
        assert_eq!(items[0].active_tasks, 2);
    }

    #[tokio::test]
    async fn test_project_health_counts() {
        let fx = Fixture::new();
        let project = fx.project("CRM").await;
        let empty = fx.project("empty").await;

        fx.task(project.id, "done", None, TaskStatus::Done, Some(days_ago(5)))
            .await;
        fx.task(project.id, "late", None, TaskStatus::Todo, Some(days_ago(5)))
            .await;
        fx.task(project.id, "open", None, TaskStatus::Todo, None).await;

        let items = fx.service.project_health(0).await.unwrap();
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].project_id, project.id);
        assert_eq!(items[0].total_tasks, 3);
        assert_eq!(items[0].done_tasks, 1);
        assert_eq!(items[0].overdue_tasks, 1);

        assert_eq!(items[1].project_id, empty.id);
        assert_eq!(items[1].total_tasks, 0);
        assert_eq!(items[1].done_tasks, 0);
        assert_eq!(items[1].overdue_tasks, 0);
    }
}
