//! Discussion thread on an issue, open to citizens and authorities.
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/issues/{id}/comments` | Yes | List comments, oldest first |
//! | POST | `/api/issues/{id}/comments` | Yes | Add a comment |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::CommentService;
