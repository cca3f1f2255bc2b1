//! API route handlers, organized by resource
//!
//! - `health`: backend probe
//! - `users`, `clients`, `projects`, `tasks`: entity CRUD
//! - `reports`: read-only aggregate views
//!
//! Handlers parse and validate input, call the matching service, and map
//! absent results to 404. No business logic lives here.

pub mod clients;
pub mod health;
pub mod projects;
pub mod reports;
pub mod tasks;
pub mod users;
