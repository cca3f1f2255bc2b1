//! Report endpoints
//!
//! - `GET /api/reports/overdue-tasks?days=N` - Tasks past their deadline
//! - `GET /api/reports/workload` - Active task counts per user
//! - `GET /api/reports/project-health?days=N` - Per-project totals
//!
//! The `days` parameter widens the overdue threshold by a grace window.
//! It is tolerated in any textual form: fractional values are truncated,
//! and anything negative or unparseable falls back to zero.

use crate::{app::AppState, error::ApiResult};
use crate::services::reports::{OverdueTaskItem, ProjectHealthItem, WorkloadItem};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

/// Query string shared by the reports that take a grace window
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    /// Grace window in days; defaults to zero
    pub days: Option<String>,
}

/// Parses the `days` parameter: truncate fractions, clamp negatives to zero
fn parse_days(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .map(|value| value.trunc() as i64)
        .filter(|value| *value >= 0)
        .unwrap_or(0)
}

/// `GET /api/reports/overdue-tasks`
pub async fn overdue_tasks(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Json<Vec<OverdueTaskItem>>> {
    let days = parse_days(query.days.as_deref());
    Ok(Json(state.reports.overdue_tasks(days).await?))
}

/// `GET /api/reports/workload`
pub async fn workload(State(state): State<AppState>) -> ApiResult<Json<Vec<WorkloadItem>>> {
    Ok(Json(state.reports.workload().await?))
}

/// `GET /api/reports/project-health`
pub async fn project_health(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Json<Vec<ProjectHealthItem>>> {
    let days = parse_days(query.days.as_deref());
    Ok(Json(state.reports.project_health(days).await?))
}
