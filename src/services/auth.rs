//! Identity registration and authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{
        log::Actor,
        user::{AdminUser, Identity, IdentityClaims, RegisterAdmin, RegisterUser, Role, User},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new member.
    ///
    /// The email must be free in both identity spaces, so later logins
    /// resolve to exactly one identity.
    pub async fn register_user(&self, request: RegisterUser) -> AppResult<User> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self.repository.users.email_exists(&request.email).await? {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = self.hash_password(&request.password)?;
        let user = self.repository.users.create_user(&request, &password_hash).await?;

        self.audit(Actor::Member(user.id), &format!("Registered account for {}", user.email))
            .await;

        Ok(user)
    }

    /// Register a new administrator. Precondition: the caller is an admin,
    /// checked by the API layer.
    pub async fn register_admin(&self, request: RegisterAdmin) -> AppResult<AdminUser> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self.repository.users.email_exists(&request.email).await? {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }
        if self
            .repository
            .users
            .admin_username_exists(&request.username)
            .await?
        {
            return Err(AppError::Conflict("Username already taken".to_string()));
        }

        let password_hash = self.hash_password(&request.password)?;
        let admin = self
            .repository
            .users
            .create_admin(&request, &password_hash)
            .await?;

        self.audit(
            Actor::Admin(admin.id),
            &format!("Created administrator account {}", admin.username),
        )
        .await;

        Ok(admin)
    }

    /// Authenticate an email/password pair and issue a bearer token.
    ///
    /// Failures are uniform: callers cannot tell an unknown email from a
    /// wrong password.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<(String, Identity)> {
        let identity = self
            .repository
            .users
            .find_identity_by_email(email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

        if !self.verify_password(identity.password_hash(), password)? {
            return Err(AppError::Authentication("Invalid email or password".to_string()));
        }

        let token = self.create_token(&identity)?;

        self.audit(Actor::from(&identity), "Logged in").await;

        Ok((token, identity))
    }

    /// Resolve the identity behind a set of claims
    pub async fn get_identity(&self, identity_id: i32, role: Role) -> AppResult<Identity> {
        match role {
            Role::Member => {
                let user = self.repository.users.get_by_id(identity_id).await?;
                Ok(Identity::Member(user))
            }
            Role::Admin => {
                let admin = self.repository.users.get_admin_by_id(identity_id).await?;
                Ok(Identity::Admin(admin))
            }
        }
    }

    /// Create a JWT token for an identity
    fn create_token(&self, identity: &Identity) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = IdentityClaims {
            sub: identity.email().to_string(),
            identity_id: identity.id(),
            role: identity.role(),
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Verify a password against its stored hash (constant-time)
    fn verify_password(&self, hash: &str, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Best-effort audit append; never fails the primary operation
    async fn audit(&self, actor: Actor, action: &str) {
        if let Err(e) = self.repository.logs.append(actor, action).await {
            tracing::warn!("Failed to append audit log entry: {}", e);
        }
    }
}
