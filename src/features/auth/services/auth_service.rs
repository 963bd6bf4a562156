use crate::core::error::{AppError, Result};
use crate::features::auth::clients::{SignUpOutcome, SupabaseAuthClient};
use crate::features::auth::dtos::{
    AuthResponseDto, MeResponseDto, SignInRequestDto, SignUpRequestDto,
};
use crate::features::auth::model::AuthenticatedUser;
use std::sync::Arc;

/// Service for sign-up, sign-in and sign-out against Supabase Auth
pub struct AuthService {
    client: Arc<SupabaseAuthClient>,
}

impl AuthService {
    pub fn new(client: Arc<SupabaseAuthClient>) -> Self {
        Self { client }
    }

    pub async fn sign_up(&self, dto: SignUpRequestDto) -> Result<AuthResponseDto> {
        let outcome = self
            .client
            .sign_up(&dto.email, &dto.password, dto.full_name.as_deref())
            .await?;

        Ok(match outcome {
            SignUpOutcome::Session(session) => {
                tracing::info!("User signed up: {}", session.user.id);
                session.into()
            }
            SignUpOutcome::ConfirmationPending(user) => {
                tracing::info!("User signed up, awaiting email confirmation: {}", user.id);
                AuthResponseDto {
                    session: None,
                    user: user.into(),
                }
            }
        })
    }

    pub async fn sign_in(&self, dto: SignInRequestDto) -> Result<AuthResponseDto> {
        let session = self.client.sign_in(&dto.email, &dto.password).await?;
        tracing::debug!("User signed in: {}", session.user.id);
        Ok(session.into())
    }

    pub async fn sign_out(&self, user: &AuthenticatedUser) -> Result<()> {
        let token = user
            .access_token
            .as_deref()
            .ok_or_else(|| AppError::Unauthorized("No active session".to_string()))?;
        self.client.sign_out(token).await?;
        tracing::debug!("User signed out: {}", user.sub);
        Ok(())
    }

    pub fn current_user(&self, user: AuthenticatedUser) -> MeResponseDto {
        user.into()
    }
}
