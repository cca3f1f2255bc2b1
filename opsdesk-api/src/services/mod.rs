//! Service layer
//!
//! Thin orchestration between the route handlers and the repositories. Each
//! entity service owns an `Arc` to its repository trait object, applies
//! creation defaults, and otherwise passes through. `reports` is the one
//! service that reads across repositories.

pub mod clients;
pub mod projects;
pub mod reports;
pub mod tasks;
pub mod users;

pub use clients::ClientsService;
pub use projects::ProjectsService;
pub use reports::ReportsService;
pub use tasks::TasksService;
pub use users::UsersService;
