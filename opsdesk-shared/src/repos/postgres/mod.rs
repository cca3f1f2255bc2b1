//! PostgreSQL repository implementations
//!
//! Backed by an sqlx connection pool. Each store is a thin wrapper around
//! plain SQL; listing order is `created_at` ascending, which mirrors the
//! insertion order the in-memory stores provide. Schema lives in the
//! `migrations/` directory and is applied at startup.

mod clients;
mod projects;
mod tasks;
mod users;

pub use clients::PgClientRepo;
pub use projects::PgProjectRepo;
pub use tasks::PgTaskRepo;
pub use users::PgUserRepo;
