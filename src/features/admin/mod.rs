//! Authority portal: triage, assignment and resolution of issues.
//!
//! Routes are nested under `/api/admin` and require the authority or admin
//! role.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/admin/issues` | Filtered, paginated issue list |
//! | PATCH | `/api/admin/issues/{id}` | Update status, assignment, costs, notes |
//! | GET | `/api/admin/stats` | Issue counts and resolution metrics |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::AdminService;
