use std::sync::Arc;

use axum::{
    extract::State,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::audit_logs::dtos::{AuditLogQuery, AuditLogResponseDto};
use crate::features::audit_logs::services::AuditLogService;
use crate::features::auth::guards::RequireAuthority;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List audit log entries (authority only)
#[utoipa::path(
    get,
    path = "/api/admin/audit-logs",
    params(AuditLogQuery, PaginationQuery),
    responses(
        (status = 200, description = "Audit log entries", body = ApiResponse<Vec<AuditLogResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Authority access required")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn list_audit_logs(
    RequireAuthority(_user): RequireAuthority,
    State(service): State<Arc<AuditLogService>>,
    AppQuery(query): AppQuery<AuditLogQuery>,
    AppQuery(pagination): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<AuditLogResponseDto>>>> {
    let (logs, total) = service.list(&query, &pagination).await?;
    let dtos = logs.into_iter().map(AuditLogResponseDto::from).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta::paginated(total, &pagination)),
    )))
}
