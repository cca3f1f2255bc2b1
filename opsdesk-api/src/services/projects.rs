//! Project service

use chrono::{DateTime, Utc};
use opsdesk_shared::models::{
    AddProjectMember, CreateProject, Project, ProjectMember, ProjectMemberRole, ProjectStatus,
    UpdateProject,
};
use opsdesk_shared::repos::{ProjectRepo, RepoResult};
use std::sync::Arc;
use uuid::Uuid;

/// Input for creating a project, before defaults are applied
#[derive(Debug, Clone)]
pub struct NewProject {
    pub client_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub budget: Option<f64>,
    pub start_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Orchestrates project and membership operations on top of a `ProjectRepo`
#[derive(Clone)]
pub struct ProjectsService {
    repo: Arc<dyn ProjectRepo>,
}

impl ProjectsService {
    pub fn new(repo: Arc<dyn ProjectRepo>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> RepoResult<Vec<Project>> {
        self.repo.list().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> RepoResult<Option<Project>> {
        self.repo.get_by_id(id).await
    }

    /// Creates a project; status defaults to PLANNED
    pub async fn create(&self, input: NewProject) -> RepoResult<Project> {
        self.repo
            .create(CreateProject {
                client_id: input.client_id,
                name: input.name,
                description: input.description,
                status: input.status.unwrap_or(ProjectStatus::Planned),
                budget: input.budget,
                start_date: input.start_date,
                due_date: input.due_date,
            })
            .await
    }

    pub async fn update(&self, id: Uuid, input: UpdateProject) -> RepoResult<Option<Project>> {
        self.repo.update(id, input).await
    }

    /// Deletes the project along with its membership rows
    pub async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        self.repo.delete(id).await
    }

    pub async fn list_members(&self, project_id: Uuid) -> RepoResult<Vec<ProjectMember>> {
        self.repo.list_members(project_id).await
    }

    /// Adds a member; role defaults to CONTRIBUTOR. Re-adding an existing
    /// (project, user) pair returns the stored row unchanged.
    pub async fn add_member(
        &self,
        project_id: Uuid,
        user_id: Uuid,
        member_role: Option<ProjectMemberRole>,
    ) -> RepoResult<ProjectMember> {
        self.repo
            .add_member(AddProjectMember {
                project_id,
                user_id,
                member_role: member_role.unwrap_or(ProjectMemberRole::Contributor),
            })
            .await
    }

    pub async fn remove_member(&self, project_id: Uuid, user_id: Uuid) -> RepoResult<bool> {
        self.repo.remove_member(project_id, user_id).await
    }
}
