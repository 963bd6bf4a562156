use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::auth::clients::{GoTrueSession, GoTrueUser};
use crate::features::auth::model::AuthenticatedUser;

/// Request DTO for citizen sign-up
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct SignUpRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub full_name: Option<String>,
}

/// Request DTO for sign-in
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct SignInRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// User info included in auth responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthUserDto {
    pub id: String,
    pub email: Option<String>,
    pub email_confirmed: bool,
    pub full_name: Option<String>,
}

impl From<GoTrueUser> for AuthUserDto {
    fn from(user: GoTrueUser) -> Self {
        let full_name = user
            .user_metadata
            .get("full_name")
            .and_then(|v| v.as_str())
            .map(String::from);
        Self {
            id: user.id,
            email: user.email,
            email_confirmed: user.email_confirmed_at.is_some(),
            full_name,
        }
    }
}

/// Session returned after sign-in (or sign-up with autoconfirm)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionDto {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_token: String,
}

/// Response DTO for sign-in / sign-up
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponseDto {
    /// Absent when the account still needs email confirmation
    pub session: Option<SessionDto>,
    pub user: AuthUserDto,
}

impl From<GoTrueSession> for AuthResponseDto {
    fn from(s: GoTrueSession) -> Self {
        Self {
            session: Some(SessionDto {
                access_token: s.access_token,
                token_type: s.token_type,
                expires_in: s.expires_in,
                refresh_token: s.refresh_token,
            }),
            user: s.user.into(),
        }
    }
}

/// DTO for /api/auth/me
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponseDto {
    pub id: String,
    pub email: Option<String>,
    pub roles: Vec<String>,
    pub is_authority: bool,
}

impl From<AuthenticatedUser> for MeResponseDto {
    fn from(user: AuthenticatedUser) -> Self {
        let is_authority = user.has_authority_access();
        Self {
            id: user.sub,
            email: user.email,
            roles: user.roles,
            is_authority,
        }
    }
}
