use super::model::{AppMetadata, AuthenticatedUser};
use crate::core::error::AppError;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use super::jwks::JwksClient;

/// Where signature keys come from
enum KeySource {
    /// Legacy projects sign with a shared HS256 secret
    Secret(DecodingKey),
    /// Projects with asymmetric signing keys publish a JWKS
    Jwks(Arc<JwksClient>),
}

/// Verifies Supabase access tokens
pub struct JwtValidator {
    keys: KeySource,
    issuer: String,
    audience: String,
    leeway: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    /// Postgres role GoTrue assigns: `authenticated`, `anon` or `service_role`
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    app_metadata: Option<AppMetadata>,
}

const AUTHENTICATED_ROLE: &str = "authenticated";

impl JwtValidator {
    pub fn with_secret(secret: &str, issuer: String, audience: String, leeway: Duration) -> Self {
        Self {
            keys: KeySource::Secret(DecodingKey::from_secret(secret.as_bytes())),
            issuer,
            audience,
            leeway: leeway.as_secs(),
        }
    }

    pub fn with_jwks(
        jwks_client: Arc<JwksClient>,
        issuer: String,
        audience: String,
        leeway: Duration,
    ) -> Self {
        Self {
            keys: KeySource::Jwks(jwks_client),
            issuer,
            audience,
            leeway: leeway.as_secs(),
        }
    }

    pub async fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let header = decode_header(token).map_err(|e| AppError::Auth(e.to_string()))?;

        let (decoding_key, algorithm) = match &self.keys {
            KeySource::Secret(key) => {
                if header.alg != Algorithm::HS256 {
                    return Err(AppError::Auth(format!(
                        "Unsupported algorithm: {:?}. Only HS256 is allowed",
                        header.alg
                    )));
                }
                (key.clone(), Algorithm::HS256)
            }
            KeySource::Jwks(client) => {
                if !matches!(header.alg, Algorithm::RS256 | Algorithm::ES256) {
                    return Err(AppError::Auth(format!(
                        "Unsupported algorithm: {:?}. Only RS256 and ES256 are allowed",
                        header.alg
                    )));
                }
                let kid = header
                    .kid
                    .as_deref()
                    .ok_or_else(|| AppError::Auth("Missing kid in token header".to_string()))?;
                let key = client
                    .get_key(kid)
                    .await
                    .map_err(|e| AppError::Auth(e.to_string()))?;
                (key, header.alg)
            }
        };

        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.leeway = self.leeway;
        validation.validate_nbf = true;

        let claims = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|e| AppError::Auth(e.to_string()))?
            .claims;

        // The anon and service keys are JWTs signed with the same secret
        if claims.role.as_deref() != Some(AUTHENTICATED_ROLE) {
            return Err(AppError::Auth(
                "Token does not belong to a signed-in user".to_string(),
            ));
        }

        Ok(AuthenticatedUser {
            sub: claims.sub,
            email: claims.email,
            roles: claims.app_metadata.unwrap_or_default().into_roles(),
            access_token: None,
        })
    }
}
