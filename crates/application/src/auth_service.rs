//! Token issuance and identity resolution.
//!
//! The token proves a prior successful login; it is never the final
//! authority on who the caller is. Resolution always re-fetches the user
//! record, so a deleted or demoted account loses access on its next request
//! even while its token is still cryptographically valid.

use std::sync::Arc;

use rosterly_core::{AppError, AppResult};
use rosterly_domain::{Identity, Role, UserId};

use crate::user_service::{UserRecord, UserRepository};

/// Lifetime of an issued auth token, in seconds (7 days).
pub const AUTH_TOKEN_TTL_SECONDS: i64 = 60 * 60 * 24 * 7;

/// Identity claims carried by an auth token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// User the token was issued to.
    pub user_id: UserId,
    /// Email at issuance time.
    pub email: String,
    /// Role at issuance time. Informational only; resolution re-fetches.
    pub role: Role,
}

/// Port for signing and verifying auth tokens.
///
/// Implementations must never panic across this boundary: any malformed,
/// tampered, or expired token validates to `None`.
pub trait TokenCodec: Send + Sync {
    /// Produces a signed token for the claims, expiring after
    /// [`AUTH_TOKEN_TTL_SECONDS`].
    fn issue(&self, claims: &TokenClaims) -> AppResult<String>;

    /// Verifies signature and expiry, returning the decoded claims.
    fn validate(&self, token: &str) -> Option<TokenClaims>;
}

/// Application service turning transported tokens into verified identities.
#[derive(Clone)]
pub struct AuthService {
    user_repository: Arc<dyn UserRepository>,
    token_codec: Arc<dyn TokenCodec>,
}

impl AuthService {
    /// Creates a new auth service.
    #[must_use]
    pub fn new(user_repository: Arc<dyn UserRepository>, token_codec: Arc<dyn TokenCodec>) -> Self {
        Self {
            user_repository,
            token_codec,
        }
    }

    /// Issues a signed token for a freshly authenticated user.
    pub fn issue_token(&self, user: &UserRecord) -> AppResult<String> {
        self.token_codec.issue(&TokenClaims {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
        })
    }

    /// Resolves a transported token into a verified, current identity.
    ///
    /// The token's embedded claims are only used to locate the user record;
    /// the returned identity reflects what is persisted right now.
    pub async fn resolve_identity(&self, token: Option<&str>) -> AppResult<Identity> {
        let Some(token) = token else {
            return Err(AppError::Unauthorized("authentication required".to_owned()));
        };

        let Some(claims) = self.token_codec.validate(token) else {
            return Err(AppError::Unauthorized(
                "invalid or expired token".to_owned(),
            ));
        };

        let user = self
            .user_repository
            .find_by_id(claims.user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("user not found".to_owned()))?;

        Ok(user.identity())
    }

    /// Non-failing variant of [`resolve_identity`](Self::resolve_identity)
    /// for call sites that want optional identity.
    pub async fn try_resolve_identity(&self, token: Option<&str>) -> Option<Identity> {
        self.resolve_identity(token).await.ok()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rosterly_core::AppError;
    use rosterly_domain::Role;

    use crate::test_support::{FakeTokenCodec, FakeUserRepository, user_record};

    use super::AuthService;

    fn service(repository: FakeUserRepository, codec: FakeTokenCodec) -> AuthService {
        AuthService::new(Arc::new(repository), Arc::new(codec))
    }

    #[tokio::test]
    async fn missing_token_requires_authentication() {
        let service = service(FakeUserRepository::default(), FakeTokenCodec::default());

        let result = service.resolve_identity(None).await;
        assert!(matches!(
            result,
            Err(AppError::Unauthorized(message)) if message == "authentication required"
        ));
    }

    #[tokio::test]
    async fn garbage_token_is_invalid() {
        let service = service(FakeUserRepository::default(), FakeTokenCodec::default());

        let result = service.resolve_identity(Some("not-a-token")).await;
        assert!(matches!(
            result,
            Err(AppError::Unauthorized(message)) if message == "invalid or expired token"
        ));
    }

    #[tokio::test]
    async fn deleted_subject_is_unauthorized_not_stale() -> rosterly_core::AppResult<()> {
        let repository = FakeUserRepository::default();
        let user = user_record(7, "gone@example.com", Role::Employee, "secret-1");
        let codec = FakeTokenCodec::default();
        let service = service(repository, codec);

        // Issue against a user that was never persisted: the token itself is
        // valid, the subject is not.
        let token = service.issue_token(&user)?;

        let result = service.resolve_identity(Some(&token)).await;
        assert!(matches!(
            result,
            Err(AppError::Unauthorized(message)) if message == "user not found"
        ));
        Ok(())
    }

    #[tokio::test]
    async fn resolution_reflects_current_record_not_claims() -> rosterly_core::AppResult<()> {
        let repository = FakeUserRepository::default();
        let user = user_record(3, "staff@example.com", Role::Employee, "secret-1");
        repository.insert(user.clone());

        let service = service(repository.clone(), FakeTokenCodec::default());
        let token = service.issue_token(&user)?;

        // Promote the user after issuance; the token still says employee.
        repository.set_role(3, Role::Admin);

        let identity = service.resolve_identity(Some(&token)).await?;
        assert_eq!(identity.role, Role::Admin);
        assert_eq!(identity.id.as_i64(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn try_resolve_swallows_failures() -> rosterly_core::AppResult<()> {
        let repository = FakeUserRepository::default();
        let user = user_record(4, "staff@example.com", Role::Employee, "secret-1");
        repository.insert(user.clone());
        let service = service(repository, FakeTokenCodec::default());

        assert!(service.try_resolve_identity(None).await.is_none());
        assert!(service.try_resolve_identity(Some("garbage")).await.is_none());

        let token = service.issue_token(&user)?;
        let identity = service.try_resolve_identity(Some(&token)).await;
        assert_eq!(identity.map(|identity| identity.id.as_i64()), Some(4));
        Ok(())
    }
}
