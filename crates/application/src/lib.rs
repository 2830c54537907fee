//! Application services and ports for Rosterly.

#![forbid(unsafe_code)]

mod auth_service;
mod authorization;
mod shift_service;
mod user_service;

#[cfg(test)]
mod test_support;

pub use auth_service::{AUTH_TOKEN_TTL_SECONDS, AuthService, TokenClaims, TokenCodec};
pub use authorization::{require_all_permissions, require_any_permission, require_permission};
pub use shift_service::{
    NewShift, ShiftAssignee, ShiftChanges, ShiftQuery, ShiftRecord, ShiftRepository, ShiftService,
    ShiftWithAssignee,
};
pub use user_service::{
    AuthOutcome, CreateUserParams, NewUser, PasswordHasher, UpdateUserParams, UserChanges,
    UserRecord, UserRepository, UserService,
};
