//! # OpsDesk Shared Library
//!
//! Shared types and persistence for the OpsDesk API server.
//!
//! ## Module Organization
//!
//! - `models`: Domain entities and their input types
//! - `repos`: Repository traits plus the in-memory and PostgreSQL stores
//! - `db`: Connection pool and migrations for the PostgreSQL backend
//! - `seed`: Demo fixtures for the in-memory backend

pub mod db;
pub mod models;
pub mod repos;
pub mod seed;

/// Current version of the OpsDesk shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
