mod duplicate_service;
mod issue_service;

pub use duplicate_service::{DuplicateDraft, DuplicateService};
pub use issue_service::IssueService;
