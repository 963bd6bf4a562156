//! Reverse geocoding for the report form's "use my location" button.
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/geocode/reverse` | Yes | Address for a coordinate pair |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::GeocodingService;
