/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================
//
// Roles come from `app_metadata.role` in the Supabase access token. Users
// without a role are treated as citizens.

/// Citizen role - can report issues, support duplicates and track their reports
pub const ROLE_CITIZEN: &str = "citizen";

/// Authority role - municipal staff who triage, assign and resolve issues
pub const ROLE_AUTHORITY: &str = "authority";

/// Admin role - authority portal administrators (departments, staff)
pub const ROLE_ADMIN: &str = "admin";
