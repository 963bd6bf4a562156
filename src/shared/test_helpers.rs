use axum::{extract::Request, middleware::Next, response::Response, Router};

use crate::features::auth::model::AuthenticatedUser;
use crate::shared::constants::{ROLE_AUTHORITY, ROLE_CITIZEN};

pub const TEST_CITIZEN_ID: &str = "00000000-0000-0000-0000-00000000c171";
pub const TEST_AUTHORITY_ID: &str = "00000000-0000-0000-0000-0000000a0717";

pub fn create_citizen_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: TEST_CITIZEN_ID.to_string(),
        email: Some("citizen@example.com".to_string()),
        roles: vec![ROLE_CITIZEN.to_string()],
        access_token: None,
    }
}

pub fn create_authority_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: TEST_AUTHORITY_ID.to_string(),
        email: Some("officer@example.com".to_string()),
        roles: vec![ROLE_AUTHORITY.to_string()],
        access_token: None,
    }
}

async fn inject_citizen_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_citizen_user());
    next.run(request).await
}

async fn inject_authority_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_authority_user());
    next.run(request).await
}

pub fn with_citizen_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_citizen_middleware))
}

pub fn with_authority_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_authority_middleware))
}
