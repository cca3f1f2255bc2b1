//! Fixture data for the in-memory backend
//!
//! When no database is configured the API starts with this demo dataset:
//! three users, two clients, three projects with members, and six tasks in
//! various states (one already overdue, one overdue-but-done). Everything is
//! created through the repository traits so the fixtures get real ids and
//! timestamps.

use crate::models::{
    AddProjectMember, CreateClient, CreateProject, CreateTask, CreateUser, ProjectMemberRole,
    ProjectStatus, TaskPriority, TaskStatus, UserRole,
};
use crate::repos::{ClientRepo, ProjectRepo, RepoResult, TaskRepo, UserRepo};
use chrono::{Duration, Utc};
use tracing::info;

/// Populates the given repositories with the demo dataset
pub async fn seed(
    users: &dyn UserRepo,
    clients: &dyn ClientRepo,
    projects: &dyn ProjectRepo,
    tasks: &dyn TaskRepo,
) -> RepoResult<()> {
    let now = Utc::now();

    let admin = users
        .create(CreateUser {
            name: "Alex Admin".to_string(),
            email: "admin@opsdesk.local".to_string(),
            role: UserRole::Admin,
            is_active: true,
        })
        .await?;
    let manager = users
        .create(CreateUser {
            name: "Mara Manager".to_string(),
            email: "manager@opsdesk.local".to_string(),
            role: UserRole::Manager,
            is_active: true,
        })
        .await?;
    let member = users
        .create(CreateUser {
            name: "Max Member".to_string(),
            email: "member@opsdesk.local".to_string(),
            role: UserRole::Member,
            is_active: true,
        })
        .await?;

    let luna = clients
        .create(CreateClient {
            name: "Luna Ltd".to_string(),
            email: Some("contact@luna.test".to_string()),
            phone: Some("+1 555 0123".to_string()),
            notes: Some("Key account, expects fast turnaround".to_string()),
        })
        .await?;
    let dawn = clients
        .create(CreateClient {
            name: "Dawn Studio".to_string(),
            email: Some("owner@dawn.test".to_string()),
            phone: Some("+1 555 0199".to_string()),
            notes: Some("Wants a redesign plus payment integration".to_string()),
        })
        .await?;

    let crm = projects
        .create(CreateProject {
            client_id: luna.id,
            name: "Sales CRM".to_string(),
            description: Some("Pipeline automation and reporting".to_string()),
            status: ProjectStatus::Active,
            budget: Some(350_000.0),
            start_date: Some(now - Duration::days(30)),
            due_date: Some(now + Duration::days(14)),
        })
        .await?;
    let website = projects
        .create(CreateProject {
            client_id: dawn.id,
            name: "Website relaunch".to_string(),
            description: Some("New site with a customer portal".to_string()),
            status: ProjectStatus::OnHold,
            budget: Some(180_000.0),
            start_date: Some(now - Duration::days(45)),
            due_date: Some(now + Duration::days(30)),
        })
        .await?;
    let support = projects
        .create(CreateProject {
            client_id: luna.id,
            name: "Support & SLA".to_string(),
            description: Some("Ongoing maintenance".to_string()),
            status: ProjectStatus::Active,
            budget: Some(90_000.0),
            start_date: Some(now - Duration::days(10)),
            due_date: Some(now + Duration::days(60)),
        })
        .await?;

    for (project_id, user_id, member_role) in [
        (crm.id, admin.id, ProjectMemberRole::Owner),
        (crm.id, manager.id, ProjectMemberRole::Manager),
        (crm.id, member.id, ProjectMemberRole::Contributor),
        (website.id, manager.id, ProjectMemberRole::Owner),
        (website.id, member.id, ProjectMemberRole::Contributor),
        (support.id, admin.id, ProjectMemberRole::Owner),
        (support.id, member.id, ProjectMemberRole::Contributor),
    ] {
        projects
            .add_member(AddProjectMember {
                project_id,
                user_id,
                member_role,
            })
            .await?;
    }

    let fixtures = [
        CreateTask {
            project_id: crm.id,
            title: "Gather requirements".to_string(),
            description: Some("Interview the sales team".to_string()),
            assignee_id: Some(manager.id),
            priority: TaskPriority::High,
            status: TaskStatus::InProgress,
            due_date: Some(now - Duration::days(3)),
        },
        CreateTask {
            project_id: crm.id,
            title: "Design the schema".to_string(),
            description: Some("ER diagram plus data dictionary".to_string()),
            assignee_id: Some(admin.id),
            priority: TaskPriority::Medium,
            status: TaskStatus::Review,
            due_date: Some(now + Duration::days(5)),
        },
        CreateTask {
            project_id: crm.id,
            title: "Collect UI references".to_string(),
            description: None,
            assignee_id: Some(member.id),
            priority: TaskPriority::Low,
            status: TaskStatus::Todo,
            due_date: Some(now + Duration::days(10)),
        },
        CreateTask {
            project_id: website.id,
            title: "Prepare the prototype".to_string(),
            description: None,
            assignee_id: Some(manager.id),
            priority: TaskPriority::Urgent,
            status: TaskStatus::Blocked,
            due_date: Some(now - Duration::days(1)),
        },
        CreateTask {
            project_id: website.id,
            title: "Sign off on the budget".to_string(),
            description: None,
            assignee_id: Some(admin.id),
            priority: TaskPriority::High,
            status: TaskStatus::Done,
            due_date: Some(now - Duration::days(7)),
        },
        CreateTask {
            project_id: support.id,
            title: "Refresh the documentation".to_string(),
            description: None,
            assignee_id: Some(member.id),
            priority: TaskPriority::Medium,
            status: TaskStatus::InProgress,
            due_date: Some(now + Duration::days(14)),
        },
    ];
    for input in fixtures {
        tasks.create(input).await?;
    }

    info!("Seeded in-memory store with demo data");
    Ok(())
}
