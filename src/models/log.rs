//! Append-only audit log model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::user::{Identity, RequestContext, Role};

/// Audit log entry; exactly one of `user_id`/`admin_id` is set
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AuditLog {
    pub id: i32,
    pub user_id: Option<i32>,
    pub admin_id: Option<i32>,
    pub action: String,
    pub timestamp: DateTime<Utc>,
}

/// Who performed an audited action
#[derive(Debug, Clone, Copy)]
pub enum Actor {
    Member(i32),
    Admin(i32),
}

impl Actor {
    pub fn user_id(&self) -> Option<i32> {
        match self {
            Actor::Member(id) => Some(*id),
            Actor::Admin(_) => None,
        }
    }

    pub fn admin_id(&self) -> Option<i32> {
        match self {
            Actor::Admin(id) => Some(*id),
            Actor::Member(_) => None,
        }
    }
}

impl From<&RequestContext> for Actor {
    fn from(ctx: &RequestContext) -> Self {
        match ctx.role {
            Role::Member => Actor::Member(ctx.identity_id),
            Role::Admin => Actor::Admin(ctx.identity_id),
        }
    }
}

impl From<&Identity> for Actor {
    fn from(identity: &Identity) -> Self {
        match identity {
            Identity::Member(u) => Actor::Member(u.id),
            Identity::Admin(a) => Actor::Admin(a.id),
        }
    }
}
