/// Integration tests for the OpsDesk API
///
/// These tests drive the full router against the in-memory backend:
/// - Health probe and backend reporting
/// - Entity CRUD with validation and 404 mapping
/// - Membership idempotency and cascade deletes
/// - Status changes with history attribution
/// - Reports reacting to task lifecycle changes
mod common;

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use common::{body_json, expect_json, TestContext};
use serde_json::{json, Value};

/// Creates a client and a project under it, returning (client_id, project_id)
async fn create_project(ctx: &TestContext) -> (String, String) {
    let client = expect_json(
        ctx.post("/api/clients", json!({ "name": "Acme Corp" })).await,
        StatusCode::CREATED,
    )
    .await;
    let client_id = client["id"].as_str().unwrap().to_string();

    let project = expect_json(
        ctx.post(
            "/api/projects",
            json!({
                "clientId": client_id,
                "name": "Website relaunch",
                "status": "ACTIVE"
            }),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let project_id = project["id"].as_str().unwrap().to_string();

    (client_id, project_id)
}

async fn create_user(ctx: &TestContext, name: &str, email: &str) -> Value {
    expect_json(
        ctx.post("/api/users", json!({ "name": name, "email": email }))
            .await,
        StatusCode::CREATED,
    )
    .await
}

#[tokio::test]
async fn test_health_reports_memory_backend() {
    let ctx = TestContext::new();

    let body = expect_json(ctx.get("/health").await, StatusCode::OK).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "memory");
}

#[tokio::test]
async fn test_seeded_store_serves_demo_data() {
    let ctx = TestContext::seeded().await;

    let users = expect_json(ctx.get("/api/users").await, StatusCode::OK).await;
    assert_eq!(users.as_array().unwrap().len(), 3);

    let clients = expect_json(ctx.get("/api/clients").await, StatusCode::OK).await;
    assert_eq!(clients.as_array().unwrap().len(), 2);

    let projects = expect_json(ctx.get("/api/projects").await, StatusCode::OK).await;
    assert_eq!(projects.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_user_create_applies_defaults() {
    let ctx = TestContext::new();

    let user = create_user(&ctx, "Ada Lovelace", "ada@example.com").await;
    assert_eq!(user["role"], "MEMBER");
    assert_eq!(user["isActive"], true);

    let updated = expect_json(
        ctx.patch(
            &format!("/api/users/{}", user["id"].as_str().unwrap()),
            json!({ "role": "MANAGER", "isActive": false }),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(updated["role"], "MANAGER");
    assert_eq!(updated["isActive"], false);
}

#[tokio::test]
async fn test_user_validation_returns_400_with_issues() {
    let ctx = TestContext::new();

    let response = ctx
        .post("/api/users", json!({ "name": "A", "email": "ada@example.com" }))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Validation error");
    let issues = body["issues"].as_array().unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0]["field"], "name");
    assert!(issues[0]["message"].as_str().unwrap().contains("at least 2"));
}

#[tokio::test]
async fn test_malformed_json_body_is_400() {
    let ctx = TestContext::new();

    let response = ctx
        .request(
            Method::POST,
            "/api/users",
            Some(json!("not an object")),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_user_is_404() {
    let ctx = TestContext::new();

    let response = ctx
        .patch(
            "/api/users/00000000-0000-0000-0000-000000000000",
            json!({ "role": "ADMIN" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn test_client_empty_email_is_stored_as_absent() {
    let ctx = TestContext::new();

    let client = expect_json(
        ctx.post("/api/clients", json!({ "name": "Acme Corp", "email": "" }))
            .await,
        StatusCode::CREATED,
    )
    .await;
    assert!(client["email"].is_null() || client.get("email").is_none());

    let response = ctx
        .post(
            "/api/clients",
            json!({ "name": "Acme Corp", "email": "not-an-email" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_client_crud_lifecycle() {
    let ctx = TestContext::new();

    let client = expect_json(
        ctx.post(
            "/api/clients",
            json!({ "name": "Acme Corp", "email": "hello@acme.test" }),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let id = client["id"].as_str().unwrap().to_string();

    let fetched = expect_json(ctx.get(&format!("/api/clients/{id}")).await, StatusCode::OK).await;
    assert_eq!(fetched["name"], "Acme Corp");

    let updated = expect_json(
        ctx.put(&format!("/api/clients/{id}"), json!({ "name": "Acme Inc" }))
            .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(updated["name"], "Acme Inc");
    assert_eq!(updated["email"], "hello@acme.test");

    let response = ctx.delete(&format!("/api/clients/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = ctx.get(&format!("/api/clients/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_project_create_defaults_to_planned() {
    let ctx = TestContext::new();

    let client = expect_json(
        ctx.post("/api/clients", json!({ "name": "Acme Corp" })).await,
        StatusCode::CREATED,
    )
    .await;

    let project = expect_json(
        ctx.post(
            "/api/projects",
            json!({ "clientId": client["id"], "name": "Kickoff" }),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(project["status"], "PLANNED");
}

#[tokio::test]
async fn test_duplicate_member_add_is_idempotent() {
    let ctx = TestContext::new();
    let (_, project_id) = create_project(&ctx).await;
    let user = create_user(&ctx, "Ada Lovelace", "ada@example.com").await;

    let first = expect_json(
        ctx.post(
            &format!("/api/projects/{project_id}/members"),
            json!({ "userId": user["id"], "memberRole": "MANAGER" }),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(first["memberRole"], "MANAGER");

    // Second add with a different role is a no-op returning the original
    let second = expect_json(
        ctx.post(
            &format!("/api/projects/{project_id}/members"),
            json!({ "userId": user["id"], "memberRole": "CONTRIBUTOR" }),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(second["memberRole"], "MANAGER");

    let members = expect_json(
        ctx.get(&format!("/api/projects/{project_id}/members")).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(members.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_remove_member() {
    let ctx = TestContext::new();
    let (_, project_id) = create_project(&ctx).await;
    let user = create_user(&ctx, "Ada Lovelace", "ada@example.com").await;
    let user_id = user["id"].as_str().unwrap().to_string();

    ctx.post(
        &format!("/api/projects/{project_id}/members"),
        json!({ "userId": user_id }),
    )
    .await;

    let response = ctx
        .delete(&format!("/api/projects/{project_id}/members/{user_id}"))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Removing again is a 404
    let response = ctx
        .delete(&format!("/api/projects/{project_id}/members/{user_id}"))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_project_delete_removes_members() {
    let ctx = TestContext::new();
    let (_, project_id) = create_project(&ctx).await;
    let user = create_user(&ctx, "Ada Lovelace", "ada@example.com").await;

    ctx.post(
        &format!("/api/projects/{project_id}/members"),
        json!({ "userId": user["id"] }),
    )
    .await;

    let response = ctx.delete(&format!("/api/projects/{project_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = ctx.get(&format!("/api/projects/{project_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let members = expect_json(
        ctx.get(&format!("/api/projects/{project_id}/members")).await,
        StatusCode::OK,
    )
    .await;
    assert!(members.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_task_delete_removes_history() {
    let ctx = TestContext::new();
    let (_, project_id) = create_project(&ctx).await;

    let task = expect_json(
        ctx.post(
            &format!("/api/projects/{project_id}/tasks"),
            json!({ "title": "Design review" }),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let task_id = task["id"].as_str().unwrap().to_string();

    ctx.patch(
        &format!("/api/tasks/{task_id}/status"),
        json!({ "status": "DONE" }),
    )
    .await;

    let response = ctx
        .delete(&format!("/api/projects/{project_id}/tasks/{task_id}"))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = ctx.get(&format!("/api/tasks/{task_id}/history")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_task_create_applies_defaults() {
    let ctx = TestContext::new();
    let (_, project_id) = create_project(&ctx).await;

    let task = expect_json(
        ctx.post(
            &format!("/api/projects/{project_id}/tasks"),
            json!({ "title": "Design review" }),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(task["priority"], "MEDIUM");
    assert_eq!(task["status"], "TODO");
    assert_eq!(task["projectId"].as_str().unwrap(), project_id);
}

#[tokio::test]
async fn test_task_update_and_delete() {
    let ctx = TestContext::new();
    let (_, project_id) = create_project(&ctx).await;

    let task = expect_json(
        ctx.post(
            &format!("/api/projects/{project_id}/tasks"),
            json!({ "title": "Design review" }),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let task_id = task["id"].as_str().unwrap().to_string();

    let updated = expect_json(
        ctx.put(
            &format!("/api/projects/{project_id}/tasks/{task_id}"),
            json!({ "title": "Design review v2", "priority": "HIGH" }),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(updated["title"], "Design review v2");
    assert_eq!(updated["priority"], "HIGH");
    assert_eq!(updated["status"], "TODO");

    let response = ctx
        .delete(&format!("/api/projects/{project_id}/tasks/{task_id}"))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let tasks = expect_json(
        ctx.get(&format!("/api/projects/{project_id}/tasks")).await,
        StatusCode::OK,
    )
    .await;
    assert!(tasks.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_status_change_records_attributed_history() {
    let ctx = TestContext::new();
    let (_, project_id) = create_project(&ctx).await;
    let user = create_user(&ctx, "Ada Lovelace", "ada@example.com").await;
    let user_id = user["id"].as_str().unwrap().to_string();

    let task = expect_json(
        ctx.post(
            &format!("/api/projects/{project_id}/tasks"),
            json!({ "title": "Design review" }),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let task_id = task["id"].as_str().unwrap().to_string();

    let change = expect_json(
        ctx.request(
            Method::PATCH,
            &format!("/api/tasks/{task_id}/status"),
            Some(json!({ "status": "IN_PROGRESS" })),
            Some(&user_id),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(change["task"]["status"], "IN_PROGRESS");
    assert_eq!(change["history"]["fromStatus"], "TODO");
    assert_eq!(change["history"]["toStatus"], "IN_PROGRESS");
    assert_eq!(change["history"]["changedBy"].as_str().unwrap(), user_id);

    // An unknown acting user falls back to the system sentinel
    let change = expect_json(
        ctx.request(
            Method::PATCH,
            &format!("/api/tasks/{task_id}/status"),
            Some(json!({ "status": "DONE" })),
            Some("00000000-0000-0000-0000-000000000000"),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(change["history"]["changedBy"], "system");

    let history = expect_json(
        ctx.get(&format!("/api/tasks/{task_id}/history")).await,
        StatusCode::OK,
    )
    .await;
    let entries = history.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["toStatus"], "IN_PROGRESS");
    assert_eq!(entries[1]["fromStatus"], "IN_PROGRESS");
    assert_eq!(entries[1]["toStatus"], "DONE");
}

#[tokio::test]
async fn test_status_change_without_header_uses_first_user() {
    let ctx = TestContext::new();
    let user = create_user(&ctx, "Ada Lovelace", "ada@example.com").await;
    create_user(&ctx, "Grace Hopper", "grace@example.com").await;
    let (_, project_id) = create_project(&ctx).await;

    let task = expect_json(
        ctx.post(
            &format!("/api/projects/{project_id}/tasks"),
            json!({ "title": "Design review" }),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;

    let change = expect_json(
        ctx.patch(
            &format!("/api/tasks/{}/status", task["id"].as_str().unwrap()),
            json!({ "status": "REVIEW" }),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(change["history"]["changedBy"], user["id"]);
}

#[tokio::test]
async fn test_status_change_on_missing_task_is_404() {
    let ctx = TestContext::new();

    let response = ctx
        .patch(
            "/api/tasks/00000000-0000-0000-0000-000000000000/status",
            json!({ "status": "DONE" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = ctx
        .get("/api/tasks/00000000-0000-0000-0000-000000000000/history")
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_overdue_report_follows_task_lifecycle() {
    let ctx = TestContext::new();
    let (_, project_id) = create_project(&ctx).await;

    let yesterday = Utc::now() - Duration::days(1);
    let task = expect_json(
        ctx.post(
            &format!("/api/projects/{project_id}/tasks"),
            json!({ "title": "Ship the beta", "dueDate": yesterday.to_rfc3339() }),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let task_id = task["id"].as_str().unwrap().to_string();

    let overdue = expect_json(
        ctx.get("/api/reports/overdue-tasks?days=0").await,
        StatusCode::OK,
    )
    .await;
    let items = overdue.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["taskId"].as_str().unwrap(), task_id);
    assert_eq!(items[0]["projectId"].as_str().unwrap(), project_id);

    // A wider grace window hides the one-day-old task
    let overdue = expect_json(
        ctx.get("/api/reports/overdue-tasks?days=7").await,
        StatusCode::OK,
    )
    .await;
    assert!(overdue.as_array().unwrap().is_empty());

    // An unparseable window falls back to zero
    let overdue = expect_json(
        ctx.get("/api/reports/overdue-tasks?days=soon").await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(overdue.as_array().unwrap().len(), 1);

    // Completing the task removes it from the report
    ctx.patch(
        &format!("/api/tasks/{task_id}/status"),
        json!({ "status": "DONE" }),
    )
    .await;

    let overdue = expect_json(
        ctx.get("/api/reports/overdue-tasks?days=0").await,
        StatusCode::OK,
    )
    .await;
    assert!(overdue.as_array().unwrap().is_empty());

    let health = expect_json(
        ctx.get("/api/reports/project-health").await,
        StatusCode::OK,
    )
    .await;
    let rows = health.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["projectId"].as_str().unwrap(), project_id);
    assert_eq!(rows[0]["totalTasks"], 1);
    assert_eq!(rows[0]["doneTasks"], 1);
    assert_eq!(rows[0]["overdueTasks"], 0);
}

#[tokio::test]
async fn test_reports_survive_astronomical_grace_windows() {
    let ctx = TestContext::new();
    let (_, project_id) = create_project(&ctx).await;

    let yesterday = Utc::now() - Duration::days(1);
    ctx.post(
        &format!("/api/projects/{project_id}/tasks"),
        json!({ "title": "Ship the beta", "dueDate": yesterday.to_rfc3339() }),
    )
    .await;

    // A window far beyond chrono's Duration range hides everything
    // instead of erroring out
    let overdue = expect_json(
        ctx.get("/api/reports/overdue-tasks?days=999999999999999999")
            .await,
        StatusCode::OK,
    )
    .await;
    assert!(overdue.as_array().unwrap().is_empty());

    let health = expect_json(
        ctx.get("/api/reports/project-health?days=999999999999999999")
            .await,
        StatusCode::OK,
    )
    .await;
    let rows = health.as_array().unwrap();
    assert_eq!(rows[0]["totalTasks"], 1);
    assert_eq!(rows[0]["overdueTasks"], 0);
}

#[tokio::test]
async fn test_workload_report_includes_idle_users() {
    let ctx = TestContext::new();
    let busy = create_user(&ctx, "Ada Lovelace", "ada@example.com").await;
    let idle = create_user(&ctx, "Grace Hopper", "grace@example.com").await;
    let (_, project_id) = create_project(&ctx).await;

    ctx.post(
        &format!("/api/projects/{project_id}/tasks"),
        json!({ "title": "Ship the beta", "assigneeId": busy["id"], "status": "BLOCKED" }),
    )
    .await;
    ctx.post(
        &format!("/api/projects/{project_id}/tasks"),
        json!({ "title": "Write the docs", "assigneeId": busy["id"], "status": "DONE" }),
    )
    .await;

    let workload = expect_json(ctx.get("/api/reports/workload").await, StatusCode::OK).await;
    let rows = workload.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["userId"], busy["id"]);
    assert_eq!(rows[0]["activeTasks"], 1);
    assert_eq!(rows[1]["userId"], idle["id"]);
    assert_eq!(rows[1]["activeTasks"], 0);
}
