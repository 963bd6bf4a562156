pub mod audit_log_handler;

pub use audit_log_handler::*;
