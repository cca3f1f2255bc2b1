//! # OpsDesk API Server
//!
//! HTTP API for the OpsDesk business management service: clients, projects,
//! project members, tasks with status history, and aggregate reports.
//!
//! ## Architecture
//!
//! The API server is built with Axum and layered as:
//! - `routes`: handlers that parse, validate, and map errors to responses
//! - `services`: per-entity orchestration plus cross-entity reports
//! - `opsdesk_shared::repos`: storage behind trait objects (in-memory or
//!   PostgreSQL, selected by configuration at startup)
//!
//! Request identity comes from the `X-User-Id` header (see [`identity`]);
//! there is no authentication beyond that attribution stand-in.

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod identity;
pub mod routes;
pub mod services;
