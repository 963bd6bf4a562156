//! Photo and voice-note uploads attached to issue reports.
//!
//! Files are stored under `{kind}/{user_id}/{uuid}.{ext}` in the media bucket
//! and the public URL is returned for use as `image_url` / `audio_url`.
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/media/upload` | Yes | Upload an image or audio note |
//! | DELETE | `/api/media` | Uploader | Delete an upload by URL |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::MediaService;
