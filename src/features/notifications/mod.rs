//! In-app notifications for citizens.
//!
//! A notification is written for the reporter whenever an authority changes
//! the status of their issue.
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/notifications` | Yes | List caller's notifications |
//! | PATCH | `/api/notifications/{id}/read` | Yes | Mark one as read |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::NotificationService;
