use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::audit_logs::{dtos as audit_dtos, handlers as audit_handlers};
use crate::features::auth;
use crate::features::comments::{dtos as comments_dtos, handlers as comments_handlers};
use crate::features::departments::{dtos as departments_dtos, handlers as departments_handlers};
use crate::features::feedback::{dtos as feedback_dtos, handlers as feedback_handlers};
use crate::features::geocoding::{dtos as geocoding_dtos, handlers as geocoding_handlers};
use crate::features::issues::{dtos as issues_dtos, handlers as issues_handlers, models as issues_models};
use crate::features::media::{dtos as media_dtos, handlers as media_handlers, models as media_models};
use crate::features::notifications::{
    dtos as notifications_dtos, handlers as notifications_handlers,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::sign_up,
        auth::handlers::sign_in,
        auth::handlers::sign_out,
        auth::handlers::get_me,
        // Issues
        issues_handlers::check_duplicates,
        issues_handlers::create_issue,
        issues_handlers::support_issue,
        issues_handlers::list_my_issues,
        issues_handlers::get_issue,
        issues_handlers::update_issue,
        issues_handlers::withdraw_issue,
        // Comments
        comments_handlers::list_comments,
        comments_handlers::add_comment,
        // Feedback
        feedback_handlers::submit_feedback,
        feedback_handlers::list_feedback,
        // Notifications
        notifications_handlers::list_notifications,
        notifications_handlers::mark_notification_read,
        // Departments & staff
        departments_handlers::list_departments,
        departments_handlers::admin_list_departments,
        departments_handlers::create_department,
        departments_handlers::list_staff,
        departments_handlers::create_staff,
        // Audit logs
        audit_handlers::list_audit_logs,
        // Media
        media_handlers::upload_media,
        media_handlers::delete_media,
        // Geocoding
        geocoding_handlers::reverse_geocode,
        // Authority portal
        admin_handlers::list_issues,
        admin_handlers::update_issue,
        admin_handlers::get_stats,
    ),
    components(
        schemas(
            Meta,
            auth::model::AuthenticatedUser,
            auth::dtos::SignUpRequestDto,
            auth::dtos::SignInRequestDto,
            auth::dtos::AuthUserDto,
            auth::dtos::SessionDto,
            auth::dtos::AuthResponseDto,
            auth::dtos::MeResponseDto,
            ApiResponse<auth::dtos::AuthResponseDto>,
            ApiResponse<auth::dtos::MeResponseDto>,
            // Issues
            issues_models::IssueCategory,
            issues_models::IssueStatus,
            issues_models::IssuePriority,
            issues_dtos::CreateIssueDto,
            issues_dtos::DuplicateCheckDto,
            issues_dtos::DuplicateCheckResponseDto,
            issues_dtos::UpdateIssueDto,
            issues_dtos::AuthorityUpdateIssueDto,
            issues_dtos::IssueResponseDto,
            ApiResponse<issues_dtos::IssueResponseDto>,
            ApiResponse<Vec<issues_dtos::IssueResponseDto>>,
            ApiResponse<issues_dtos::DuplicateCheckResponseDto>,
            // Comments
            comments_dtos::CreateCommentDto,
            comments_dtos::CommentResponseDto,
            ApiResponse<comments_dtos::CommentResponseDto>,
            ApiResponse<Vec<comments_dtos::CommentResponseDto>>,
            // Feedback
            feedback_dtos::CreateFeedbackDto,
            feedback_dtos::FeedbackResponseDto,
            ApiResponse<feedback_dtos::FeedbackResponseDto>,
            ApiResponse<Vec<feedback_dtos::FeedbackResponseDto>>,
            // Notifications
            notifications_dtos::NotificationResponseDto,
            ApiResponse<notifications_dtos::NotificationResponseDto>,
            ApiResponse<Vec<notifications_dtos::NotificationResponseDto>>,
            // Departments & staff
            departments_dtos::CreateDepartmentDto,
            departments_dtos::DepartmentResponseDto,
            departments_dtos::CreateStaffDto,
            departments_dtos::StaffResponseDto,
            ApiResponse<departments_dtos::DepartmentResponseDto>,
            ApiResponse<Vec<departments_dtos::DepartmentResponseDto>>,
            ApiResponse<departments_dtos::StaffResponseDto>,
            ApiResponse<Vec<departments_dtos::StaffResponseDto>>,
            // Audit logs
            audit_dtos::AuditLogResponseDto,
            ApiResponse<Vec<audit_dtos::AuditLogResponseDto>>,
            // Media
            media_models::MediaKind,
            media_dtos::UploadMediaDto,
            media_dtos::MediaResponseDto,
            media_dtos::DeleteMediaDto,
            ApiResponse<media_dtos::MediaResponseDto>,
            // Geocoding
            geocoding_dtos::AddressResponseDto,
            ApiResponse<geocoding_dtos::AddressResponseDto>,
            // Authority portal
            admin_dtos::StatusCountDto,
            admin_dtos::CategoryCountDto,
            admin_dtos::PriorityCountDto,
            admin_dtos::IssueStatsDto,
            ApiResponse<admin_dtos::IssueStatsDto>,
        )
    ),
    tags(
        (name = "auth", description = "Sign-up, sign-in and session endpoints (Supabase Auth)"),
        (name = "issues", description = "Citizen issue reports and duplicate detection"),
        (name = "comments", description = "Discussion on issues"),
        (name = "feedback", description = "Citizen feedback on resolved issues"),
        (name = "notifications", description = "Status change notifications"),
        (name = "departments", description = "Municipal departments and staff"),
        (name = "media", description = "Photo and voice-note uploads"),
        (name = "geocoding", description = "Reverse geocoding"),
        (name = "admin", description = "Authority portal (authority or admin role)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Nagar Mitra API",
        version = "0.1.0",
        description = "Civic issue reporting and authority portal API",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_issue_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/issues/duplicates"));
        assert!(doc.paths.paths.contains_key("/api/admin/issues/{id}"));
        assert!(doc.paths.paths.contains_key("/api/geocode/reverse"));
    }

    #[test]
    fn test_bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
