//! Audit trail read service

use crate::{error::AppResult, models::log::AuditLog, repository::Repository};

#[derive(Clone)]
pub struct AuditService {
    repository: Repository,
}

impl AuditService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Most recent audit entries, newest first
    pub async fn recent(&self, limit: i64) -> AppResult<Vec<AuditLog>> {
        self.repository.logs.list_recent(limit).await
    }
}
