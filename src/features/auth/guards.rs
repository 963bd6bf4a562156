//! Role-based authorization guards.
//!
//! Role hierarchy (from highest to lowest):
//! - admin: authority portal administration (departments, staff)
//! - authority: triage, assign and resolve issues
//! - citizen: report issues and track their own reports
//!
//! Higher roles include the permissions of lower ones.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

fn authenticated(parts: &Parts) -> Result<&AuthenticatedUser, AppError> {
    parts
        .extensions
        .get::<AuthenticatedUser>()
        .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))
}

/// Guard for authority portal endpoints.
///
/// Allows users with the "authority" or "admin" role.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAuthority(user): RequireAuthority) { ... }
/// ```
pub struct RequireAuthority(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAuthority
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticated(parts)?;

        if !user.has_authority_access() {
            return Err(AppError::Forbidden("Authority access required".to_string()));
        }

        Ok(RequireAuthority(user.clone()))
    }
}

/// Guard for administrative endpoints (departments, staff).
///
/// Only allows users with the "admin" role.
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticated(parts)?;

        if !user.is_admin() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(RequireAdmin(user.clone()))
    }
}
