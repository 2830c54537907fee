//! Role-based access control: the permission set, the static role table,
//! and the pure decision predicates layered on top of it.
//!
//! The role table is a process-wide constant. There is no mutation path and
//! no storage lookup; every decision is a pure function of the caller's
//! identity and its arguments.

use std::str::FromStr;

use rosterly_core::AppError;
use serde::{Deserialize, Serialize};

use crate::user::{Identity, Role, UserId};

/// Permissions enforced by application policy checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Allows viewing every shift on the schedule.
    ShiftViewAll,
    /// Allows viewing shifts assigned to the caller.
    ShiftViewOwn,
    /// Allows creating shifts.
    ShiftCreate,
    /// Allows updating shifts.
    ShiftUpdate,
    /// Allows deleting shifts.
    ShiftDelete,
    /// Allows listing and viewing user accounts.
    UserViewAll,
    /// Allows creating user accounts.
    UserCreate,
    /// Allows updating user accounts.
    UserUpdate,
    /// Allows deleting user accounts.
    UserDelete,
}

impl Permission {
    /// Returns a stable storage value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShiftViewAll => "shift:view:all",
            Self::ShiftViewOwn => "shift:view:own",
            Self::ShiftCreate => "shift:create",
            Self::ShiftUpdate => "shift:update",
            Self::ShiftDelete => "shift:delete",
            Self::UserViewAll => "user:view:all",
            Self::UserCreate => "user:create",
            Self::UserUpdate => "user:update",
            Self::UserDelete => "user:delete",
        }
    }

    /// Returns all known permissions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Permission] = &[
            Permission::ShiftViewAll,
            Permission::ShiftViewOwn,
            Permission::ShiftCreate,
            Permission::ShiftUpdate,
            Permission::ShiftDelete,
            Permission::UserViewAll,
            Permission::UserCreate,
            Permission::UserUpdate,
            Permission::UserDelete,
        ];

        ALL
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "shift:view:all" => Ok(Self::ShiftViewAll),
            "shift:view:own" => Ok(Self::ShiftViewOwn),
            "shift:create" => Ok(Self::ShiftCreate),
            "shift:update" => Ok(Self::ShiftUpdate),
            "shift:delete" => Ok(Self::ShiftDelete),
            "user:view:all" => Ok(Self::UserViewAll),
            "user:create" => Ok(Self::UserCreate),
            "user:update" => Ok(Self::UserUpdate),
            "user:delete" => Ok(Self::UserDelete),
            _ => Err(AppError::Validation(format!(
                "unknown permission value '{value}'"
            ))),
        }
    }
}

const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::ShiftViewAll,
    Permission::ShiftCreate,
    Permission::ShiftUpdate,
    Permission::ShiftDelete,
    Permission::UserViewAll,
    Permission::UserCreate,
    Permission::UserUpdate,
    Permission::UserDelete,
];

const EMPLOYEE_PERMISSIONS: &[Permission] = &[Permission::ShiftViewOwn];

/// Returns the static permission set assigned to a role.
///
/// Total over the role enumeration; a role never maps to an error, at worst
/// to an empty set.
#[must_use]
pub fn role_permissions(role: Role) -> &'static [Permission] {
    match role {
        Role::Admin => ADMIN_PERMISSIONS,
        Role::Employee => EMPLOYEE_PERMISSIONS,
    }
}

/// Returns whether the identity's role grants a specific permission.
#[must_use]
pub fn has_permission(identity: &Identity, permission: Permission) -> bool {
    role_permissions(identity.role).contains(&permission)
}

/// Returns whether the identity holds at least one of the permissions.
///
/// An empty slice yields `false`.
#[must_use]
pub fn has_any_permission(identity: &Identity, permissions: &[Permission]) -> bool {
    permissions
        .iter()
        .any(|permission| has_permission(identity, *permission))
}

/// Returns whether the identity holds every one of the permissions.
///
/// An empty slice yields `true` (vacuous truth). Callers passing empty sets
/// rely on the asymmetry with [`has_any_permission`].
#[must_use]
pub fn has_all_permissions(identity: &Identity, permissions: &[Permission]) -> bool {
    permissions
        .iter()
        .all(|permission| has_permission(identity, *permission))
}

/// Ownership policy: view a shift.
///
/// The broad permission wins outright; otherwise the narrow permission
/// combined with an ownership match. Every ownership-scoped pair uses the
/// same precedence.
#[must_use]
pub fn can_view_shift(identity: &Identity, shift_owner_id: UserId) -> bool {
    if has_permission(identity, Permission::ShiftViewAll) {
        return true;
    }

    has_permission(identity, Permission::ShiftViewOwn) && identity.id == shift_owner_id
}

/// Policy: create a shift.
#[must_use]
pub fn can_create_shift(identity: &Identity) -> bool {
    has_permission(identity, Permission::ShiftCreate)
}

/// Policy: update a shift.
#[must_use]
pub fn can_update_shift(identity: &Identity) -> bool {
    has_permission(identity, Permission::ShiftUpdate)
}

/// Policy: delete a shift.
#[must_use]
pub fn can_delete_shift(identity: &Identity) -> bool {
    has_permission(identity, Permission::ShiftDelete)
}

/// Policy: list and view user accounts.
#[must_use]
pub fn can_view_users(identity: &Identity) -> bool {
    has_permission(identity, Permission::UserViewAll)
}

/// Policy: create a user account.
#[must_use]
pub fn can_create_user(identity: &Identity) -> bool {
    has_permission(identity, Permission::UserCreate)
}

/// Policy: update a user account.
#[must_use]
pub fn can_update_user(identity: &Identity) -> bool {
    has_permission(identity, Permission::UserUpdate)
}

/// Policy: delete a user account.
#[must_use]
pub fn can_delete_user(identity: &Identity) -> bool {
    has_permission(identity, Permission::UserDelete)
}
