mod authority_update;
mod issue;

pub use authority_update::AuthorityUpdate;
#[cfg(test)]
pub(crate) use issue::fixtures;
pub use issue::{
    CreateIssue, Issue, IssueCategory, IssueFilter, IssuePriority, IssueStatus, UpdateIssue,
};
