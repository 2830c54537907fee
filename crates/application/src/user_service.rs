//! User management ports and application service.
//!
//! Owns user lifecycle operations: account creation, credential
//! verification, updates, and deletion. Login failures are reported with a
//! single generic outcome so callers cannot enumerate accounts.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use rosterly_core::{AppError, AppResult, NonEmptyString};
use rosterly_domain::{EmailAddress, Identity, Role, UserId, validate_password};

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// User record returned by repository queries.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    /// Unique user identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Canonical email address, stored lowercased.
    pub email: String,
    /// Role assigned to the account.
    pub role: Role,
    /// Adaptive one-way hash of the account password.
    pub password_hash: String,
    /// Record creation time.
    pub created_at: DateTime<Utc>,
    /// Last record update time.
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Projects the record into a request identity, dropping credential
    /// material.
    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Field values for a new user record.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Canonical email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Role for the new account.
    pub role: Role,
}

/// Partial update applied to an existing user record.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    /// Replacement display name, if any.
    pub name: Option<String>,
    /// Replacement email address, if any.
    pub email: Option<String>,
    /// Replacement role, if any.
    pub role: Option<Role>,
}

/// Repository port for user persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>>;

    /// Finds a user by their unique identifier.
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>>;

    /// Lists every user record.
    async fn list(&self) -> AppResult<Vec<UserRecord>>;

    /// Creates a new user record.
    async fn create(&self, user: &NewUser) -> AppResult<UserRecord>;

    /// Applies a partial update. Returns `None` when the user does not exist.
    async fn update(&self, user_id: UserId, changes: &UserChanges)
    -> AppResult<Option<UserRecord>>;

    /// Deletes a user record. Returns whether a record was removed.
    async fn delete(&self, user_id: UserId) -> AppResult<bool>;
}

/// Port for password hashing operations. Keeps the application layer free of
/// direct cryptographic library coupling.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password with the adaptive scheme.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    /// The comparison is constant time in the underlying primitive.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}

// ---------------------------------------------------------------------------
// Authentication outcome
// ---------------------------------------------------------------------------

/// Result of a login attempt.
#[derive(Debug)]
pub enum AuthOutcome {
    /// Credentials were valid. A token can be issued for the record.
    Authenticated(UserRecord),
    /// Authentication failed. The generic value prevents enumeration.
    Failed,
}

/// Parameters for creating a user account.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    /// Display name for the account.
    pub name: String,
    /// Email address; must be unique.
    pub email: String,
    /// Plaintext password, validated and hashed before storage.
    pub password: String,
    /// Role for the account.
    pub role: Role,
}

/// Parameters for a partial user update.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserParams {
    /// Replacement display name, if any.
    pub name: Option<String>,
    /// Replacement email address, if any.
    pub email: Option<String>,
    /// Replacement role, if any.
    pub role: Option<Role>,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Application service for user accounts and credential verification.
#[derive(Clone)]
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    /// Creates a new user service.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
        }
    }

    /// Authenticates a user with email and password.
    ///
    /// Returns [`AuthOutcome::Failed`] for unknown email and wrong password
    /// alike; the caller surfaces one generic message for both.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthOutcome> {
        let user = self.user_repository.find_by_email(email).await?;

        let Some(user) = user else {
            // Hash anyway so unknown emails cost the same as wrong passwords.
            let _ = self.password_hasher.hash_password(password);
            return Ok(AuthOutcome::Failed);
        };

        let password_valid = self
            .password_hasher
            .verify_password(password, &user.password_hash)?;

        if !password_valid {
            return Ok(AuthOutcome::Failed);
        }

        Ok(AuthOutcome::Authenticated(user))
    }

    /// Creates a new user account with a hashed password.
    pub async fn create_user(&self, params: CreateUserParams) -> AppResult<UserRecord> {
        let name = NonEmptyString::new(params.name)?;
        let email = EmailAddress::new(params.email)?;
        validate_password(&params.password)?;

        if self
            .user_repository
            .find_by_email(email.as_str())
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "a user with this email already exists".to_owned(),
            ));
        }

        let password_hash = self.password_hasher.hash_password(&params.password)?;

        self.user_repository
            .create(&NewUser {
                name: name.into(),
                email: email.into(),
                password_hash,
                role: params.role,
            })
            .await
    }

    /// Applies a partial update to an existing user.
    pub async fn update_user(
        &self,
        user_id: UserId,
        params: UpdateUserParams,
    ) -> AppResult<UserRecord> {
        let name = params
            .name
            .map(NonEmptyString::new)
            .transpose()?
            .map(String::from);

        let email = params
            .email
            .map(EmailAddress::new)
            .transpose()?
            .map(String::from);

        if let Some(ref new_email) = email
            && let Some(existing) = self.user_repository.find_by_email(new_email).await?
            && existing.id != user_id
        {
            return Err(AppError::Conflict(
                "a user with this email already exists".to_owned(),
            ));
        }

        let changes = UserChanges {
            name,
            email,
            role: params.role,
        };

        self.user_repository
            .update(user_id, &changes)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_owned()))
    }

    /// Deletes a user account.
    pub async fn delete_user(&self, user_id: UserId) -> AppResult<()> {
        if !self.user_repository.delete(user_id).await? {
            return Err(AppError::NotFound("user not found".to_owned()));
        }

        Ok(())
    }

    /// Lists every user record.
    pub async fn list_users(&self) -> AppResult<Vec<UserRecord>> {
        self.user_repository.list().await
    }

    /// Returns a user record by ID, if it exists.
    pub async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        self.user_repository.find_by_id(user_id).await
    }

    /// Returns a user record by email, if it exists.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        self.user_repository.find_by_email(email).await
    }

    /// Returns a reference to the password hasher for use by other services.
    #[must_use]
    pub fn password_hasher(&self) -> &Arc<dyn PasswordHasher> {
        &self.password_hasher
    }
}
