//! Authentication and registration endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::user::{AdminUser, RegisterAdmin, RegisterUser, Role, User},
};

use super::AuthenticatedIdentity;

/// Login request
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    pub token: String,
    pub token_type: String,
    pub identity: IdentityInfo,
}

/// Public identity details
#[derive(Serialize, ToSchema)]
pub struct IdentityInfo {
    pub id: i32,
    pub role: Role,
    pub email: String,
    pub name: String,
}

impl From<&crate::models::Identity> for IdentityInfo {
    fn from(identity: &crate::models::Identity) -> Self {
        Self {
            id: identity.id(),
            role: identity.role(),
            email: identity.email().to_string(),
            name: identity.display_name(),
        }
    }
}

/// Register a new member account
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "Account created", body = User),
        (status = 400, description = "Invalid registration data"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(request): Json<RegisterUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = state.services.auth.register_user(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Authenticate and obtain a bearer token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (token, identity) = state
        .services
        .auth
        .authenticate(&request.email, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        identity: IdentityInfo::from(&identity),
    }))
}

/// Get the authenticated identity
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current identity", body = IdentityInfo),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<crate::AppState>,
    AuthenticatedIdentity(ctx): AuthenticatedIdentity,
) -> AppResult<Json<IdentityInfo>> {
    let identity = state
        .services
        .auth
        .get_identity(ctx.identity_id, ctx.role)
        .await?;
    Ok(Json(IdentityInfo::from(&identity)))
}

/// Create a new administrator account
#[utoipa::path(
    post,
    path = "/admins",
    tag = "auth",
    security(("bearer_auth" = [])),
    request_body = RegisterAdmin,
    responses(
        (status = 201, description = "Administrator created", body = AdminUser),
        (status = 400, description = "Invalid registration data"),
        (status = 403, description = "Administrator privileges required"),
        (status = 409, description = "Email or username already taken")
    )
)]
pub async fn create_admin(
    State(state): State<crate::AppState>,
    AuthenticatedIdentity(ctx): AuthenticatedIdentity,
    Json(request): Json<RegisterAdmin>,
) -> AppResult<(StatusCode, Json<AdminUser>)> {
    ctx.require_admin()?;

    let admin = state.services.auth.register_admin(request).await?;
    Ok((StatusCode::CREATED, Json(admin)))
}
