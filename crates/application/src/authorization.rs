//! Permission enforcement over the static role table.
//!
//! The boolean predicates live in the domain crate; these wrappers are the
//! first layer allowed to raise a terminating failure, which the API layer
//! translates to a 403.

use rosterly_core::{AppError, AppResult};
use rosterly_domain::{
    Identity, Permission, has_all_permissions, has_any_permission, has_permission,
};

const INSUFFICIENT_PERMISSIONS: &str = "insufficient permissions";

/// Ensures the identity holds a specific permission.
pub fn require_permission(identity: &Identity, permission: Permission) -> AppResult<()> {
    if !has_permission(identity, permission) {
        return Err(AppError::Forbidden(INSUFFICIENT_PERMISSIONS.to_owned()));
    }

    Ok(())
}

/// Ensures the identity holds at least one of the permissions.
pub fn require_any_permission(identity: &Identity, permissions: &[Permission]) -> AppResult<()> {
    if !has_any_permission(identity, permissions) {
        return Err(AppError::Forbidden(INSUFFICIENT_PERMISSIONS.to_owned()));
    }

    Ok(())
}

/// Ensures the identity holds every one of the permissions.
pub fn require_all_permissions(identity: &Identity, permissions: &[Permission]) -> AppResult<()> {
    if !has_all_permissions(identity, permissions) {
        return Err(AppError::Forbidden(INSUFFICIENT_PERMISSIONS.to_owned()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rosterly_core::AppError;
    use rosterly_domain::{Identity, Permission, Role, UserId};

    use super::{require_all_permissions, require_any_permission, require_permission};

    fn identity(role: Role) -> Identity {
        Identity {
            id: UserId::new(1),
            name: "Test User".to_owned(),
            email: "test@example.com".to_owned(),
            role,
        }
    }

    #[test]
    fn granted_permission_passes() {
        let admin = identity(Role::Admin);
        assert!(require_permission(&admin, Permission::ShiftDelete).is_ok());
    }

    #[test]
    fn missing_permission_is_forbidden() {
        let employee = identity(Role::Employee);
        let result = require_permission(&employee, Permission::ShiftDelete);
        assert!(matches!(
            result,
            Err(AppError::Forbidden(message)) if message == "insufficient permissions"
        ));
    }

    #[test]
    fn require_any_over_empty_set_is_forbidden() {
        let admin = identity(Role::Admin);
        assert!(require_any_permission(&admin, &[]).is_err());
    }

    #[test]
    fn require_all_over_empty_set_passes() {
        let employee = identity(Role::Employee);
        assert!(require_all_permissions(&employee, &[]).is_ok());
    }
}
