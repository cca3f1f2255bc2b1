//! In-memory project store, including project memberships

use crate::models::{AddProjectMember, CreateProject, Project, ProjectMember, UpdateProject};
use crate::repos::{ProjectRepo, RepoResult};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
struct State {
    projects: Vec<Project>,
    members: Vec<ProjectMember>,
}

/// In-memory `ProjectRepo`
///
/// Members live in the same store so that deleting a project can drop its
/// membership rows in one critical section.
#[derive(Debug, Default)]
pub struct MemoryProjectRepo {
    state: RwLock<State>,
}

impl MemoryProjectRepo {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepo for MemoryProjectRepo {
    async fn list(&self) -> RepoResult<Vec<Project>> {
        Ok(self.state.read().await.projects.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> RepoResult<Option<Project>> {
        Ok(self
            .state
            .read()
            .await
            .projects
            .iter()
            .find(|project| project.id == id)
            .cloned())
    }

    async fn create(&self, input: CreateProject) -> RepoResult<Project> {
        let project = Project {
            id: Uuid::new_v4(),
            client_id: input.client_id,
            name: input.name,
            description: input.description,
            status: input.status,
            budget: input.budget,
            start_date: input.start_date,
            due_date: input.due_date,
            created_at: Utc::now(),
        };
        self.state.write().await.projects.push(project.clone());
        Ok(project)
    }

    async fn update(&self, id: Uuid, input: UpdateProject) -> RepoResult<Option<Project>> {
        let mut state = self.state.write().await;
        let Some(project) = state.projects.iter_mut().find(|project| project.id == id) else {
            return Ok(None);
        };
        if let Some(client_id) = input.client_id {
            project.client_id = client_id;
        }
        if let Some(name) = input.name {
            project.name = name;
        }
        if let Some(description) = input.description {
            project.description = Some(description);
        }
        if let Some(status) = input.status {
            project.status = status;
        }
        if let Some(budget) = input.budget {
            project.budget = Some(budget);
        }
        if let Some(start_date) = input.start_date {
            project.start_date = Some(start_date);
        }
        if let Some(due_date) = input.due_date {
            project.due_date = Some(due_date);
        }
        Ok(Some(project.clone()))
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let mut state = self.state.write().await;
        let before = state.projects.len();
        state.projects.retain(|project| project.id != id);
        if state.projects.len() == before {
            return Ok(false);
        }
        state.members.retain(|member| member.project_id != id);
        Ok(true)
    }

    async fn list_members(&self, project_id: Uuid) -> RepoResult<Vec<ProjectMember>> {
        Ok(self
            .state
            .read()
            .await
            .members
            .iter()
            .filter(|member| member.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn add_member(&self, input: AddProjectMember) -> RepoResult<ProjectMember> {
        let mut state = self.state.write().await;
        if let Some(existing) = state
            .members
            .iter()
            .find(|member| member.project_id == input.project_id && member.user_id == input.user_id)
        {
            return Ok(existing.clone());
        }
        let member = ProjectMember {
            project_id: input.project_id,
            user_id: input.user_id,
            member_role: input.member_role,
        };
        state.members.push(member.clone());
        Ok(member)
    }

    async fn remove_member(&self, project_id: Uuid, user_id: Uuid) -> RepoResult<bool> {
        let mut state = self.state.write().await;
        let before = state.members.len();
        state
            .members
            .retain(|member| !(member.project_id == project_id && member.user_id == user_id));
        Ok(state.members.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProjectMemberRole, ProjectStatus};

    fn create_input(name: &str) -> CreateProject {
        CreateProject {
            client_id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            status: ProjectStatus::Planned,
            budget: None,
            start_date: None,
            due_date: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_member_is_noop_returning_existing() {
        let repo = MemoryProjectRepo::new();
        let project = repo.create(create_input("CRM rollout")).await.unwrap();
        let user_id = Uuid::new_v4();

        let first = repo
            .add_member(AddProjectMember {
                project_id: project.id,
                user_id,
                member_role: ProjectMemberRole::Owner,
            })
            .await
            .unwrap();

        // Re-adding with a different role must not change the stored row
        let second = repo
            .add_member(AddProjectMember {
                project_id: project.id,
                user_id,
                member_role: ProjectMemberRole::Contributor,
            })
            .await
            .unwrap();

        assert_eq!(second.member_role, ProjectMemberRole::Owner);
        assert_eq!(first.user_id, second.user_id);
        assert_eq!(repo.list_members(project.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_project_removes_members() {
        let repo = MemoryProjectRepo::new();
        let project = repo.create(create_input("Support SLA")).await.unwrap();
        repo.add_member(AddProjectMember {
            project_id: project.id,
            user_id: Uuid::new_v4(),
            member_role: ProjectMemberRole::Contributor,
        })
        .await
        .unwrap();
        repo.add_member(AddProjectMember {
            project_id: project.id,
            user_id: Uuid::new_v4(),
            member_role: ProjectMemberRole::Manager,
        })
        .await
        .unwrap();

        assert!(repo.delete(project.id).await.unwrap());
        assert!(repo.list_members(project.id).await.unwrap().is_empty());
        assert!(repo.get_by_id(project.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_missing_member_is_false() {
        let repo = MemoryProjectRepo::new();
        let project = repo.create(create_input("Website")).await.unwrap();
        assert!(!repo
            .remove_member(project.id, Uuid::new_v4())
            .await
            .unwrap());
    }
}
