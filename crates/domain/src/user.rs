//! User domain types and validation rules.

use std::str::FromStr;

use rosterly_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Unique identifier for a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(i64);

impl UserId {
    /// Creates a user identifier from a database key.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// Performs basic structural validation: non-empty, contains exactly one `@`,
    /// local part and domain are non-empty, domain contains at least one `.`.
    /// The stored value is trimmed and lowercased.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim().to_lowercase();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "email address must not be empty".to_owned(),
            ));
        }

        let parts: Vec<&str> = trimmed.splitn(2, '@').collect();
        if parts.len() != 2 {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        }

        let local = parts[0];
        let domain = parts[1];

        if local.is_empty() {
            return Err(AppError::Validation(
                "email local part must not be empty".to_owned(),
            ));
        }

        if domain.is_empty() || !domain.contains('.') {
            return Err(AppError::Validation(
                "email domain must contain at least one '.'".to_owned(),
            ));
        }

        if trimmed.len() > 254 {
            return Err(AppError::Validation(
                "email address must not exceed 254 characters".to_owned(),
            ));
        }

        Ok(Self(trimmed))
    }

    /// Returns the validated email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Closed set of roles a user can hold. Exactly one role per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full scheduling and user administration access.
    Admin,
    /// Regular staff member; sees only their own shifts.
    Employee,
}

impl Role {
    /// Returns the stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Employee => "employee",
        }
    }

    /// Returns all known roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[Role::Admin, Role::Employee];

        ALL
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "employee" => Ok(Self::Employee),
            _ => Err(AppError::Validation(format!("unknown role '{value}'"))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A resolved, verified representation of the caller for one request.
///
/// Always projected from a fresh user lookup, never from token claims alone,
/// so role or account changes apply on the very next request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique user identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Canonical email address.
    pub email: String,
    /// Role currently persisted for the user.
    pub role: Role,
}

/// Minimum password length accepted at account creation.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Maximum password length, protecting the hasher from oversized input.
pub const PASSWORD_MAX_LENGTH: usize = 128;

/// Validates a plaintext password against the account creation rules.
pub fn validate_password(password: &str) -> AppResult<()> {
    let char_count = password.chars().count();

    if char_count < PASSWORD_MIN_LENGTH {
        return Err(AppError::Validation(format!(
            "password must be at least {PASSWORD_MIN_LENGTH} characters"
        )));
    }

    if char_count > PASSWORD_MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "password must not exceed {PASSWORD_MAX_LENGTH} characters"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn valid_email_is_accepted_and_lowercased() -> rosterly_core::AppResult<()> {
        let email = EmailAddress::new("STAFF@Example.COM")?;
        assert_eq!(email.as_str(), "staff@example.com");
        Ok(())
    }

    #[test]
    fn email_without_at_is_rejected() {
        assert!(EmailAddress::new("noatsign").is_err());
    }

    #[test]
    fn email_without_domain_dot_is_rejected() {
        assert!(EmailAddress::new("user@nodot").is_err());
    }

    #[test]
    fn empty_email_is_rejected() {
        assert!(EmailAddress::new("").is_err());
    }

    #[test]
    fn role_roundtrip_storage_value() -> rosterly_core::AppResult<()> {
        for role in Role::all() {
            assert_eq!(Role::from_str(role.as_str())?, *role);
        }
        Ok(())
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(Role::from_str("manager").is_err());
    }

    #[test]
    fn short_password_is_rejected() {
        assert!(validate_password("short").is_err());
    }

    #[test]
    fn adequate_password_is_accepted() {
        assert!(validate_password("a-reasonable-passphrase").is_ok());
    }

    #[test]
    fn very_long_password_is_rejected() {
        let long = "a".repeat(PASSWORD_MAX_LENGTH + 1);
        assert!(validate_password(&long).is_err());
    }
}
