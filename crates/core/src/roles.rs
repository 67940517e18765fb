//! Well-known role name constants.
//!
//! Roles are derived from the `is_admin` flag on the user row; these names
//! appear in JWT claims and are checked by the API's RBAC extractors.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MEMBER: &str = "member";

/// Resolve the role name for a user's `is_admin` flag.
pub fn role_name(is_admin: bool) -> &'static str {
    if is_admin {
        ROLE_ADMIN
    } else {
        ROLE_MEMBER
    }
}
