//! Append-only trail of authority actions on issues.
//!
//! Entries are written inside the same transaction as the change they
//! describe. Authorities can page through them.
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/admin/audit-logs` | Authority | List audit entries |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::AuditLogService;
