//! Database layer
//!
//! Connection pooling and embedded migrations for the PostgreSQL backend.
//! Only used when `DATABASE_URL` is configured; the in-memory repositories
//! never touch this module.

pub mod migrations;
pub mod pool;

pub use migrations::run_migrations;
pub use pool::{create_pool, health_check, DatabaseConfig};
