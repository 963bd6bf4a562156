use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::{ROLE_ADMIN, ROLE_AUTHORITY, ROLE_CITIZEN};

/// Caller identity extracted from a verified Supabase access token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Supabase user id (`sub` claim)
    pub sub: String,
    pub email: Option<String>,
    pub roles: Vec<String>,
    /// Raw bearer token, kept so sign-out can be forwarded to GoTrue
    #[serde(skip)]
    pub access_token: Option<String>,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }

    pub fn is_authority(&self) -> bool {
        self.has_role(ROLE_AUTHORITY)
    }

    /// Authority portal access (authority or admin)
    pub fn has_authority_access(&self) -> bool {
        self.is_admin() || self.is_authority()
    }
}

/// Supabase `app_metadata` claim; only the role fields are read
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppMetadata {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl AppMetadata {
    /// Roles granted by the project, defaulting to citizen
    pub fn into_roles(self) -> Vec<String> {
        let mut roles = self.roles;
        if let Some(role) = self.role {
            if !roles.contains(&role) {
                roles.push(role);
            }
        }
        if roles.is_empty() {
            roles.push(ROLE_CITIZEN.to_string());
        }
        roles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_metadata_defaults_to_citizen() {
        let roles = AppMetadata::default().into_roles();
        assert_eq!(roles, vec![ROLE_CITIZEN.to_string()]);
    }

    #[test]
    fn test_app_metadata_merges_role_fields() {
        let meta = AppMetadata {
            role: Some(ROLE_AUTHORITY.to_string()),
            roles: vec![ROLE_ADMIN.to_string()],
        };
        let roles = meta.into_roles();
        assert!(roles.contains(&ROLE_ADMIN.to_string()));
        assert!(roles.contains(&ROLE_AUTHORITY.to_string()));
    }

    #[test]
    fn test_authority_access() {
        let mut user = AuthenticatedUser {
            sub: "u1".to_string(),
            email: None,
            roles: vec![ROLE_CITIZEN.to_string()],
            access_token: None,
        };
        assert!(!user.has_authority_access());

        user.roles = vec![ROLE_AUTHORITY.to_string()];
        assert!(user.has_authority_access());
        assert!(!user.is_admin());
    }
}
