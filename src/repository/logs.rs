//! Append-only audit log repository

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::log::{Actor, AuditLog},
};

#[derive(Clone)]
pub struct LogsRepository {
    pool: Pool<Postgres>,
}

impl LogsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Append an audit entry; the timestamp is server-assigned
    pub async fn append(&self, actor: Actor, action: &str) -> AppResult<()> {
        sqlx::query("INSERT INTO logs (user_id, admin_id, action) VALUES ($1, $2, $3)")
            .bind(actor.user_id())
            .bind(actor.admin_id())
            .bind(action)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Most recent audit entries, newest first
    pub async fn list_recent(&self, limit: i64) -> AppResult<Vec<AuditLog>> {
        let entries = sqlx::query_as::<_, AuditLog>(
            "SELECT * FROM logs ORDER BY timestamp DESC, id DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }
}
