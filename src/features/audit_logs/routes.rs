use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::audit_logs::handlers;
use crate::features::audit_logs::services::AuditLogService;

/// Authority routes, mounted behind the auth middleware
pub fn admin_routes(service: Arc<AuditLogService>) -> Router {
    Router::new()
        .route("/api/admin/audit-logs", get(handlers::list_audit_logs))
        .with_state(service)
}
