//! Users and administrators repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::user::{AdminUser, Identity, RegisterAdmin, RegisterUser, User},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Get administrator by ID
    pub async fn get_admin_by_id(&self, id: i32) -> AppResult<AdminUser> {
        sqlx::query_as::<_, AdminUser>("SELECT * FROM admin_users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Administrator with id {} not found", id)))
    }

    /// Check whether an email is held in either identity space.
    ///
    /// Registration rejects an email that exists anywhere, so a later
    /// `find_identity_by_email` can match at most one identity.
    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))
                OR EXISTS(SELECT 1 FROM admin_users WHERE LOWER(email) = LOWER($1))
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Resolve an email to an identity across both stores
    pub async fn find_identity_by_email(&self, email: &str) -> AppResult<Option<Identity>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(user) = user {
            return Ok(Some(Identity::Member(user)));
        }

        let admin = sqlx::query_as::<_, AdminUser>(
            "SELECT * FROM admin_users WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin.map(Identity::Admin))
    }

    /// Create a new member with an already-hashed password
    pub async fn create_user(&self, user: &RegisterUser, password_hash: &str) -> AppResult<User> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (first_name, last_name, email, phone, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Create a new administrator with an already-hashed password
    pub async fn create_admin(
        &self,
        admin: &RegisterAdmin,
        password_hash: &str,
    ) -> AppResult<AdminUser> {
        let created = sqlx::query_as::<_, AdminUser>(
            r#"
            INSERT INTO admin_users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&admin.username)
        .bind(&admin.email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Check whether an admin username is taken
    pub async fn admin_username_exists(&self, username: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM admin_users WHERE LOWER(username) = LOWER($1))",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
