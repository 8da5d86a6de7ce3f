//! User and administrator identity models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;

/// Role of an authenticated identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Member,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Regular user (library member)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub registration_date: DateTime<Utc>,
}

/// Administrator, stored in its own identity space
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AdminUser {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// A resolved identity from either store.
///
/// Login resolves against both stores through a single lookup; callers never
/// see the users-then-admins ordering.
#[derive(Debug, Clone)]
pub enum Identity {
    Member(User),
    Admin(AdminUser),
}

impl Identity {
    pub fn id(&self) -> i32 {
        match self {
            Identity::Member(u) => u.id,
            Identity::Admin(a) => a.id,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Identity::Member(u) => &u.email,
            Identity::Admin(a) => &a.email,
        }
    }

    pub fn password_hash(&self) -> &str {
        match self {
            Identity::Member(u) => &u.password_hash,
            Identity::Admin(a) => &a.password_hash,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Identity::Member(_) => Role::Member,
            Identity::Admin(_) => Role::Admin,
        }
    }

    /// Display name for audit entries
    pub fn display_name(&self) -> String {
        match self {
            Identity::Member(u) => format!("{} {}", u.first_name, u.last_name),
            Identity::Admin(a) => a.username.clone(),
        }
    }
}

/// Member registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUser {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub password: String,
}

/// Administrator registration request (admin only)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterAdmin {
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// JWT claims for an authenticated identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub sub: String,
    pub identity_id: i32,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl IdentityClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}

/// Resolved identity and role for the current request.
///
/// Built by the authentication extractor and passed explicitly into every
/// service operation; services never read ambient session state.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext {
    pub identity_id: i32,
    pub role: Role,
}

impl RequestContext {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Require admin privileges
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Administrator privileges required".to_string(),
            ))
        }
    }

    /// Require a member identity (admins do not hold library cards)
    pub fn require_member(&self) -> Result<(), AppError> {
        if self.role == Role::Member {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "A member account is required to borrow".to_string(),
            ))
        }
    }

    /// Require the context to be the given member, or an admin
    pub fn require_self_or_admin(&self, user_id: i32) -> Result<(), AppError> {
        if self.is_admin() || (self.role == Role::Member && self.identity_id == user_id) {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Access restricted to the account owner".to_string(),
            ))
        }
    }
}
