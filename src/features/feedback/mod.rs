//! Citizen ratings of how their resolved issue was handled.
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/issues/{id}/feedback` | Reporter | Rate a resolved issue |
//! | GET | `/api/admin/feedback` | Authority | List feedback |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::FeedbackService;
