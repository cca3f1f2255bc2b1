//! Application state and router builder
//!
//! The state bundles one service per entity plus the reports service; each
//! service holds an `Arc` to its repository trait object, so the whole state
//! clones cheaply per request. The concrete repository implementation
//! (in-memory or PostgreSQL) is chosen once, at construction.
//!
//! # Router Layout
//!
//! ```text
//! /
//! ├── /health                                 # backend probe
//! └── /api/
//!     ├── /users, /users/:id
//!     ├── /clients, /clients/:id
//!     ├── /projects, /projects/:project_id
//!     │   ├── /members, /members/:user_id
//!     │   └── /tasks, /tasks/:task_id
//!     ├── /tasks/:task_id/status, /tasks/:task_id/history
//!     └── /reports/{overdue-tasks, workload, project-health}
//! ```

use crate::config::Config;
use crate::services::{ClientsService, ProjectsService, ReportsService, TasksService, UsersService};
use crate::{identity, routes};
use axum::{
    routing::{delete, get, patch},
    Router,
};
use opsdesk_shared::repos::postgres::{PgClientRepo, PgProjectRepo, PgTaskRepo, PgUserRepo};
use opsdesk_shared::repos::{ClientRepo, ProjectRepo, TaskRepo, UserRepo};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Which store the repositories were bound to at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Seeded in-memory maps; nothing survives a restart
    Memory,

    /// Remote PostgreSQL database
    Remote,
}

impl StorageBackend {
    /// Value reported by the health endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Memory => "memory",
            StorageBackend::Remote => "remote",
        }
    }
}

/// Shared application state, cloned per request
#[derive(Clone)]
pub struct AppState {
    pub users: UsersService,
    pub clients: ClientsService,
    pub projects: ProjectsService,
    pub tasks: TasksService,
    pub reports: ReportsService,
    pub backend: StorageBackend,
    pub config: Arc<Config>,
}

impl AppState {
    /// Builds state from already-constructed repositories
    pub fn new(
        users: Arc<dyn UserRepo>,
        clients: Arc<dyn ClientRepo>,
        projects: Arc<dyn ProjectRepo>,
        tasks: Arc<dyn TaskRepo>,
        backend: StorageBackend,
        config: Config,
    ) -> Self {
        Self {
            reports: ReportsService::new(users.clone(), projects.clone(), tasks.clone()),
            users: UsersService::new(users),
            clients: ClientsService::new(clients),
            projects: ProjectsService::new(projects),
            tasks: TasksService::new(tasks),
            backend,
            config: Arc::new(config),
        }
    }

    /// Builds state on top of a PostgreSQL pool
    pub fn with_postgres(pool: PgPool, config: Config) -> Self {
        Self::new(
            Arc::new(PgUserRepo::new(pool.clone())),
            Arc::new(PgClientRepo::new(pool.clone())),
            Arc::new(PgProjectRepo::new(pool.clone())),
            Arc::new(PgTaskRepo::new(pool)),
            StorageBackend::Remote,
            config,
        )
    }
}

/// Builds the complete router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/users",
            get(routes::users::list).post(routes::users::create),
        )
        .route("/users/:id", patch(routes::users::update))
        .route(
            "/clients",
            get(routes::clients::list).post(routes::clients::create),
        )
        .route(
            "/clients/:id",
            get(routes::clients::get)
                .put(routes::clients::update)
                .delete(routes::clients::delete),
        )
        .route(
            "/projects",
            get(routes::projects::list).post(routes::projects::create),
        )
        .route(
            "/projects/:project_id",
            get(routes::projects::get)
                .put(routes::projects::update)
                .delete(routes::projects::delete),
        )
        .route(
            "/projects/:project_id/members",
            get(routes::projects::list_members).post(routes::projects::add_member),
        )
        .route(
            "/projects/:project_id/members/:user_id",
            delete(routes::projects::remove_member),
        )
        .route(
            "/projects/:project_id/tasks",
            get(routes::tasks::list).post(routes::tasks::create),
        )
        .route(
            "/projects/:project_id/tasks/:task_id",
            axum::routing::put(routes::tasks::update).delete(routes::tasks::delete),
        )
        .route("/tasks/:task_id/status", patch(routes::tasks::update_status))
        .route("/tasks/:task_id/history", get(routes::tasks::list_history))
        .route("/reports/overdue-tasks", get(routes::reports::overdue_tasks))
        .route("/reports/workload", get(routes::reports::workload))
        .route(
            "/reports/project-health",
            get(routes::reports::project_health),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            identity::resolve_identity,
        ));

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
