//! Login endpoint
//!
//! Exchanges a username/password pair for a bearer token.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::Role;
use crate::context::AppContext;

use super::{ApiError, ApiResult};

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// The user payload echoed back on a successful login
#[derive(Debug, Serialize)]
pub struct LoginUser {
    pub username: String,
    pub role: Role,
    pub name: String,
}

/// Successful login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}

/// POST /api/login
pub async fn login(
    State(ctx): State<AppContext>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("Username and password are required"));
    }

    let account = ctx
        .users
        .authenticate(&req.username, &req.password)
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    let token = ctx.sessions.issue(account);
    tracing::info!(user = %account.username, "login successful");

    Ok(Json(LoginResponse {
        token,
        user: LoginUser {
            username: account.username.clone(),
            role: account.role,
            name: account.display_name.clone(),
        },
    }))
}
