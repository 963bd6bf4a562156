use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{
    AuthResponseDto, MeResponseDto, SignInRequestDto, SignUpRequestDto,
};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use validator::Validate;

/// Sign up with email and password
#[utoipa::path(
    post,
    path = "/api/auth/sign-up",
    request_body = SignUpRequestDto,
    responses(
        (status = 201, description = "User registered", body = ApiResponse<AuthResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    ),
    tag = "auth"
)]
pub async fn sign_up(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<SignUpRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponseDto>>)> {
    dto.validate()?;

    let response = service.sign_up(dto).await?;
    let message = response
        .session
        .is_none()
        .then(|| "Check your email to confirm your account".to_string());
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(response), message, None)),
    ))
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/sign-in",
    request_body = SignInRequestDto,
    responses(
        (status = 200, description = "Signed in", body = ApiResponse<AuthResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn sign_in(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<SignInRequestDto>,
) -> Result<Json<ApiResponse<AuthResponseDto>>> {
    dto.validate()?;

    let response = service.sign_in(dto).await?;
    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

/// Sign out the current session
#[utoipa::path(
    post,
    path = "/api/auth/sign-out",
    responses(
        (status = 200, description = "Signed out"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(("bearer_auth" = []))
)]
pub async fn sign_out(
    user: AuthenticatedUser,
    State(service): State<Arc<AuthService>>,
) -> Result<Json<ApiResponse<()>>> {
    service.sign_out(&user).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Signed out".to_string()),
        None,
    )))
}

/// Get the current user
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<MeResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(("bearer_auth" = []))
)]
pub async fn get_me(
    user: AuthenticatedUser,
    State(service): State<Arc<AuthService>>,
) -> Result<Json<ApiResponse<MeResponseDto>>> {
    Ok(Json(ApiResponse::success(
        Some(service.current_user(user)),
        None,
        None,
    )))
}
