//! Authorization guard chain
//!
//! Request guards are ordered predicates evaluated before a handler body
//! runs: first the token guard (is there a valid bearer token?), then the
//! role guard (does the session's role suffice?). Each guard either allows
//! the request to continue or rejects it with a reason; [`authorize`]
//! composes the chain.

use axum::http::{header, HeaderMap};
use thiserror::Error;

use super::tokens::SessionStore;
use super::users::Role;

/// The authenticated caller, produced by a successful guard chain
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
    pub display_name: String,
    pub role: Role,
}

impl AuthUser {
    /// Whether this caller holds the admin role
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Why a guard rejected the request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuardError {
    /// No Authorization header present
    #[error("Access token is required")]
    MissingToken,

    /// Authorization header is not `Bearer <token>`
    #[error("Invalid token format, use: Bearer <token>")]
    MalformedHeader,

    /// Token unknown or expired
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Token valid but the role does not suffice
    #[error("Access denied, insufficient permissions")]
    Forbidden,
}

/// Run the guard chain: token check, then optional role check
///
/// `required_role` of `None` admits any authenticated caller. The role guard
/// is only reached once the token guard has passed, so a missing token on an
/// admin-only route reports a token problem, not a permission problem.
pub fn authorize(
    sessions: &SessionStore,
    headers: &HeaderMap,
    required_role: Option<Role>,
) -> Result<AuthUser, GuardError> {
    let token = bearer_token(headers)?;
    let user = check_token(sessions, token)?;
    if let Some(role) = required_role {
        check_role(&user, role)?;
    }
    Ok(user)
}

/// Token guard, step one: extract the bearer token from the headers
fn bearer_token(headers: &HeaderMap) -> Result<&str, GuardError> {
    let header = headers
        .get(header::AUTHORIZATION)
        .ok_or(GuardError::MissingToken)?;

    let value = header.to_str().map_err(|_| GuardError::MalformedHeader)?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or(GuardError::MalformedHeader)?
        .trim();

    if token.is_empty() {
        return Err(GuardError::MissingToken);
    }
    Ok(token)
}

/// Token guard, step two: the token must map to a live session
fn check_token(sessions: &SessionStore, token: &str) -> Result<AuthUser, GuardError> {
    let session = sessions.validate(token).ok_or(GuardError::InvalidToken)?;
    Ok(AuthUser {
        username: session.username,
        display_name: session.display_name,
        role: session.role,
    })
}

/// Role guard: the session's role must match the required one
fn check_role(user: &AuthUser, required: Role) -> Result<(), GuardError> {
    if user.role == required {
        Ok(())
    } else {
        Err(GuardError::Forbidden)
    }
}
