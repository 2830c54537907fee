//! HS256 JWT implementation of the token codec port.
//!
//! The signed claims are `{user_id, email, role, iat, exp}` with a 7-day
//! expiry. Validation never panics: tampered, malformed, and expired tokens
//! all decode to `None`.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use rosterly_application::{AUTH_TOKEN_TTL_SECONDS, TokenClaims, TokenCodec};
use rosterly_core::{AppError, AppResult};
use rosterly_domain::{Role, UserId};

#[derive(Debug, Serialize, Deserialize)]
struct JwtClaims {
    user_id: i64,
    email: String,
    role: Role,
    iat: i64,
    exp: i64,
}

/// Token codec signing claims with a process-wide HS256 secret.
#[derive(Clone)]
pub struct JwtTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenCodec {
    /// Creates a codec from the configured signing secret.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, claims: &TokenClaims) -> AppResult<String> {
        let issued_at = chrono::Utc::now().timestamp();
        let payload = JwtClaims {
            user_id: claims.user_id.as_i64(),
            email: claims.email.clone(),
            role: claims.role,
            iat: issued_at,
            exp: issued_at + AUTH_TOKEN_TTL_SECONDS,
        };

        jsonwebtoken::encode(&Header::default(), &payload, &self.encoding_key)
            .map_err(|error| AppError::Internal(format!("failed to sign auth token: {error}")))
    }

    fn validate(&self, token: &str) -> Option<TokenClaims> {
        jsonwebtoken::decode::<JwtClaims>(token, &self.decoding_key, &self.validation)
            .ok()
            .map(|data| TokenClaims {
                user_id: UserId::new(data.claims.user_id),
                email: data.claims.email,
                role: data.claims.role,
            })
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{EncodingKey, Header};
    use rosterly_application::{TokenClaims, TokenCodec};
    use rosterly_domain::{Role, UserId};

    use super::{JwtClaims, JwtTokenCodec};

    const TEST_SECRET: &str = "a-test-only-secret-that-is-long-enough";

    fn claims() -> TokenClaims {
        TokenClaims {
            user_id: UserId::new(42),
            email: "staff@example.com".to_owned(),
            role: Role::Employee,
        }
    }

    #[test]
    fn issued_token_roundtrips_claims() -> rosterly_core::AppResult<()> {
        let codec = JwtTokenCodec::new(TEST_SECRET);
        let token = codec.issue(&claims())?;

        let decoded = codec.validate(&token);
        assert_eq!(decoded, Some(claims()));
        Ok(())
    }

    #[test]
    fn two_issuances_both_validate() -> rosterly_core::AppResult<()> {
        let codec = JwtTokenCodec::new(TEST_SECRET);
        let first = codec.issue(&claims())?;
        let second = codec.issue(&claims())?;

        assert!(codec.validate(&first).is_some());
        assert!(codec.validate(&second).is_some());
        Ok(())
    }

    #[test]
    fn expired_token_fails_validation() -> rosterly_core::AppResult<()> {
        let codec = JwtTokenCodec::new(TEST_SECRET);

        // Encode with the same secret but an expiry an hour in the past,
        // beyond the validator's default leeway.
        let now = chrono::Utc::now().timestamp();
        let payload = JwtClaims {
            user_id: 42,
            email: "staff@example.com".to_owned(),
            role: Role::Employee,
            iat: now - 7_200,
            exp: now - 3_600,
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &payload,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .map_err(|error| rosterly_core::AppError::Internal(error.to_string()))?;

        assert!(codec.validate(&token).is_none());
        Ok(())
    }

    #[test]
    fn tampered_signature_fails_validation() -> rosterly_core::AppResult<()> {
        let codec = JwtTokenCodec::new(TEST_SECRET);
        let token = codec.issue(&claims())?;

        // Flip the final signature character.
        let mut tampered = token.clone();
        let replacement = if tampered.ends_with('A') { "B" } else { "A" };
        tampered.replace_range(tampered.len() - 1.., replacement);
        assert_ne!(token, tampered);

        assert!(codec.validate(&tampered).is_none());
        Ok(())
    }

    #[test]
    fn wrong_secret_fails_validation() -> rosterly_core::AppResult<()> {
        let issuing_codec = JwtTokenCodec::new(TEST_SECRET);
        let verifying_codec = JwtTokenCodec::new("a-completely-different-secret-value");

        let token = issuing_codec.issue(&claims())?;
        assert!(verifying_codec.validate(&token).is_none());
        Ok(())
    }

    #[test]
    fn malformed_token_fails_validation() {
        let codec = JwtTokenCodec::new(TEST_SECRET);
        assert!(codec.validate("not-a-jwt").is_none());
        assert!(codec.validate("").is_none());
    }
}
