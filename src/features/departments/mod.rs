//! Municipal departments and their field staff.
//!
//! Issues are assigned to a department and optionally to one staff member.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/departments` | Yes | Department directory |
//! | GET | `/api/admin/departments` | Authority | List departments |
//! | POST | `/api/admin/departments` | Admin | Create a department |
//! | GET | `/api/admin/staff` | Authority | List staff |
//! | POST | `/api/admin/staff` | Admin | Add a staff member |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{DepartmentService, StaffService};
