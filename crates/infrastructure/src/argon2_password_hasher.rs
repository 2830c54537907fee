//! Argon2id password hasher implementation.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rosterly_application::PasswordHasher as PasswordHasherPort;
use rosterly_core::{AppError, AppResult};

/// Argon2id password hasher with the library's recommended cost parameters.
///
/// The cost is fixed at construction; changing it only affects hashes
/// created afterwards, and verification reads the parameters embedded in
/// each stored hash.
#[derive(Clone, Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Creates a new Argon2id hasher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasherPort for Argon2PasswordHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|error| AppError::Internal(format!("failed to hash password: {error}")))?;

        Ok(hash.to_string())
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash).map_err(|error| {
            AppError::Internal(format!("failed to parse password hash: {error}"))
        })?;

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(error) => Err(AppError::Internal(format!(
                "password verification failed: {error}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use rosterly_application::PasswordHasher as PasswordHasherPort;
    use rosterly_core::AppResult;

    use super::Argon2PasswordHasher;

    #[test]
    fn hash_and_verify_correct_password() -> AppResult<()> {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash_password("night-shift-rota")?;
        assert!(hasher.verify_password("night-shift-rota", &hash)?);
        Ok(())
    }

    #[test]
    fn verify_wrong_password_returns_false() -> AppResult<()> {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash_password("correct-password")?;
        assert!(!hasher.verify_password("wrong-password", &hash)?);
        Ok(())
    }

    #[test]
    fn two_hashes_of_same_password_differ() -> AppResult<()> {
        let hasher = Argon2PasswordHasher::new();
        let first = hasher.hash_password("same-password")?;
        let second = hasher.hash_password("same-password")?;
        assert_ne!(first, second);
        Ok(())
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        let hasher = Argon2PasswordHasher::new();
        assert!(hasher.verify_password("anything", "not-a-phc-string").is_err());
    }
}
