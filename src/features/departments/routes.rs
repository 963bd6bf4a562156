use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::departments::handlers::{self, DepartmentState};
use crate::features::departments::services::{DepartmentService, StaffService};

fn state(
    department_service: Arc<DepartmentService>,
    staff_service: Arc<StaffService>,
) -> DepartmentState {
    DepartmentState {
        department_service,
        staff_service,
    }
}

/// Department directory for signed-in users
pub fn routes(
    department_service: Arc<DepartmentService>,
    staff_service: Arc<StaffService>,
) -> Router {
    Router::new()
        .route("/api/departments", get(handlers::list_departments))
        .with_state(state(department_service, staff_service))
}

/// Authority portal routes for departments and staff
pub fn admin_routes(
    department_service: Arc<DepartmentService>,
    staff_service: Arc<StaffService>,
) -> Router {
    Router::new()
        .route(
            "/api/admin/departments",
            get(handlers::admin_list_departments).post(handlers::create_department),
        )
        .route(
            "/api/admin/staff",
            get(handlers::list_staff).post(handlers::create_staff),
        )
        .with_state(state(department_service, staff_service))
}
