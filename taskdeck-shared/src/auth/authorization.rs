/// Ownership authorization check
///
/// Every user-scoped and task-scoped endpoint carries a user id in
/// its path. Access is allowed only when that id equals the
/// authenticated user's own id: a strict equality check with no
/// admin bypass and no role hierarchy.

use crate::models::user::User;

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// Path user id does not match the authenticated user
    #[error("Access denied")]
    OwnerMismatch,
}

/// Requires that `user` is the owner named by the path
///
/// Called before any read or mutation on a user-scoped resource.
///
/// # Errors
///
/// Returns `AuthzError::OwnerMismatch` iff `user.id != path_user_id`
pub fn require_owner(user: &User, path_user_id: i64) -> Result<(), AuthzError> {
    if user.id != path_user_id {
        return Err(AuthzError::OwnerMismatch);
    }
    Ok(())
}
