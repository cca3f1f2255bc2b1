//! In-memory repository implementations
//!
//! Used when `DATABASE_URL` is not configured, and by the test suites. Each
//! store keeps its rows in a `Vec` behind a `tokio::sync::RwLock`, so listing
//! order is insertion order by construction. Nothing is persisted across
//! restarts; the API seeds fixture data at startup instead.

mod clients;
mod projects;
mod tasks;
mod users;

pub use clients::MemoryClientRepo;
pub use projects::MemoryProjectRepo;
pub use tasks::MemoryTaskRepo;
pub use users::MemoryUserRepo;
