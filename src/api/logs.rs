//! Audit trail endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{error::AppResult, models::log::AuditLog};

use super::AuthenticatedIdentity;

const DEFAULT_LIMIT: i64 = 100;
const MAX_LIMIT: i64 = 1000;

/// Audit listing parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct LogQuery {
    /// Maximum number of entries to return (default 100, capped at 1000)
    pub limit: Option<i64>,
}

/// List recent audit log entries
#[utoipa::path(
    get,
    path = "/logs",
    tag = "logs",
    security(("bearer_auth" = [])),
    params(LogQuery),
    responses(
        (status = 200, description = "Recent audit entries", body = Vec<AuditLog>),
        (status = 403, description = "Administrator privileges required")
    )
)]
pub async fn list_logs(
    State(state): State<crate::AppState>,
    AuthenticatedIdentity(ctx): AuthenticatedIdentity,
    Query(query): Query<LogQuery>,
) -> AppResult<Json<Vec<AuditLog>>> {
    ctx.require_admin()?;

    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let entries = state.services.audit.recent(limit).await?;
    Ok(Json(entries))
}
