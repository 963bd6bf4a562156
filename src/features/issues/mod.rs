//! Civic issues reported by citizens.
//!
//! Before submitting, the client runs a duplicate check. If likely duplicates
//! come back the citizen may support one of them (bumping its complaint count
//! and priority) instead of filing a new report.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/issues/duplicates` | Yes | Find duplicate candidates |
//! | POST | `/api/issues` | Yes | Report an issue |
//! | POST | `/api/issues/{id}/support` | Yes | Support an open issue |
//! | GET | `/api/issues/mine` | Yes | Caller's issues |
//! | GET | `/api/issues/{id}` | Yes | Issue detail |
//! | PUT | `/api/issues/{id}` | Reporter | Edit while pending |
//! | DELETE | `/api/issues/{id}` | Reporter | Withdraw |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::{DuplicateService, IssueService};
