use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// GoTrue user object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoTrueUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_confirmed_at: Option<String>,
    #[serde(default)]
    pub user_metadata: serde_json::Value,
}

/// GoTrue session returned by sign-in (and by sign-up when autoconfirm is on)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoTrueSession {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_token: String,
    pub user: GoTrueUser,
}

/// Sign-up either signs the user in or waits for email confirmation
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SignUpOutcome {
    Session(GoTrueSession),
    ConfirmationPending(GoTrueUser),
}

#[derive(Debug, Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    data: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct PasswordGrantRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// GoTrue error body; older and newer versions use different field names
#[derive(Debug, Default, Deserialize)]
struct GoTrueErrorResponse {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

impl GoTrueErrorResponse {
    fn code(&self) -> &str {
        self.error_code
            .as_deref()
            .or(self.error.as_deref())
            .unwrap_or_default()
    }

    fn message(&self) -> String {
        self.msg
            .clone()
            .or_else(|| self.error_description.clone())
            .unwrap_or_else(|| "Unknown auth error".to_string())
    }
}

/// Client for the Supabase Auth (GoTrue) REST API
pub struct SupabaseAuthClient {
    api_url: String,
    anon_key: String,
    http_client: reqwest::Client,
}

impl SupabaseAuthClient {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            api_url: config.auth_api_url(),
            anon_key: config.anon_key.clone(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Register a new email/password user
    ///
    /// Returns Conflict if the email is already registered
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<SignUpOutcome> {
        let url = format!("{}/signup", self.api_url);
        let body = SignUpRequest {
            email,
            password,
            data: serde_json::json!({ "full_name": full_name }),
        };

        tracing::debug!("Signing up user in Supabase: {}", email);

        let response = self
            .http_client
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Supabase sign-up request failed: {}", e);
                AppError::ExternalServiceError(format!("Failed to sign up: {}", e))
            })?;

        let status = response.status();
        if status.is_success() {
            return response.json::<SignUpOutcome>().await.map_err(|e| {
                tracing::error!("Failed to parse Supabase sign-up response: {}", e);
                AppError::ExternalServiceError(format!("Failed to parse sign-up response: {}", e))
            });
        }

        let error = Self::read_error(response).await;
        if error.code() == "user_already_exists" || error.message().contains("already registered")
        {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }
        if status.as_u16() == 422 || status.as_u16() == 400 {
            return Err(AppError::Validation(error.message()));
        }

        tracing::error!("Supabase auth error: HTTP {} - {}", status, error.message());
        Err(AppError::ExternalServiceError(format!(
            "Supabase auth error: HTTP {}",
            status
        )))
    }

    /// Exchange email/password for a session
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<GoTrueSession> {
        let url = format!("{}/token?grant_type=password", self.api_url);

        let response = self
            .http_client
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&PasswordGrantRequest { email, password })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Supabase sign-in request failed: {}", e);
                AppError::ExternalServiceError(format!("Failed to sign in: {}", e))
            })?;

        let status = response.status();
        if status.is_success() {
            return response.json::<GoTrueSession>().await.map_err(|e| {
                tracing::error!("Failed to parse Supabase session: {}", e);
                AppError::ExternalServiceError(format!("Failed to parse session: {}", e))
            });
        }

        let error = Self::read_error(response).await;
        if status.as_u16() == 400 {
            if error.code() == "email_not_confirmed" {
                return Err(AppError::Forbidden("Email not confirmed".to_string()));
            }
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        tracing::error!("Supabase auth error: HTTP {} - {}", status, error.message());
        Err(AppError::ExternalServiceError(format!(
            "Supabase auth error: HTTP {}",
            status
        )))
    }

    /// Revoke the session behind an access token
    pub async fn sign_out(&self, access_token: &str) -> Result<()> {
        let url = format!("{}/logout", self.api_url);

        let response = self
            .http_client
            .post(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Supabase sign-out request failed: {}", e);
                AppError::ExternalServiceError(format!("Failed to sign out: {}", e))
            })?;

        let status = response.status();
        // 401/404 mean the session is already gone
        if status.is_success() || status.as_u16() == 401 || status.as_u16() == 404 {
            return Ok(());
        }

        let error = Self::read_error(response).await;
        tracing::error!("Supabase sign-out error: HTTP {} - {}", status, error.message());
        Err(AppError::ExternalServiceError(format!(
            "Supabase auth error: HTTP {}",
            status
        )))
    }

    async fn read_error(response: reqwest::Response) -> GoTrueErrorResponse {
        let body = response.text().await.unwrap_or_default();
        serde_json::from_str(&body).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_up_outcome_session() {
        let body = serde_json::json!({
            "access_token": "a",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "r",
            "user": { "id": "u1", "email": "x@example.com" }
        });
        let outcome: SignUpOutcome = serde_json::from_value(body).unwrap();
        assert!(matches!(outcome, SignUpOutcome::Session(_)));
    }

    #[test]
    fn test_sign_up_outcome_pending_confirmation() {
        let body = serde_json::json!({ "id": "u1", "email": "x@example.com" });
        let outcome: SignUpOutcome = serde_json::from_value(body).unwrap();
        assert!(matches!(outcome, SignUpOutcome::ConfirmationPending(_)));
    }

    #[test]
    fn test_error_response_field_variants() {
        let new_style: GoTrueErrorResponse = serde_json::from_str(
            r#"{"code":422,"error_code":"user_already_exists","msg":"User already registered"}"#,
        )
        .unwrap();
        assert_eq!(new_style.code(), "user_already_exists");
        assert_eq!(new_style.message(), "User already registered");

        let old_style: GoTrueErrorResponse = serde_json::from_str(
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        )
        .unwrap();
        assert_eq!(old_style.code(), "invalid_grant");
        assert_eq!(old_style.message(), "Invalid login credentials");
    }
}
