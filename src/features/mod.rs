pub mod admin;
pub mod audit_logs;
pub mod auth;
pub mod comments;
pub mod departments;
pub mod feedback;
pub mod geocoding;
pub mod issues;
pub mod media;
pub mod notifications;
