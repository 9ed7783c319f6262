//! Bearer-token issuance and verification.
//!
//! Tokens are HS256 JWTs signed with a shared secret, carrying the
//! acting user's id, email and role, and expiring after the configured
//! number of days (5 by default).

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use matchday_core::{UserId, UserRole};

use crate::models::User;

/// Error verifying or issuing a bearer token.
#[derive(Debug, thiserror::Error)]
#[error("token error: {0}")]
pub struct TokenError(#[from] jsonwebtoken::errors::Error);

/// Claims carried by every bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Acting user.
    pub id: UserId,
    pub email: String,
    pub role: UserRole,
    /// Expiry as a unix timestamp.
    pub exp: i64,
}

/// Issues and verifies bearer tokens.
///
/// The signing keys are derived from the configured secret once at
/// startup; see `AppState::new`.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    /// Create a token service from the shared signing secret.
    #[must_use]
    pub fn new(secret: &SecretString, ttl_days: i64) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            ttl: Duration::days(ttl_days),
        }
    }

    /// Issue a token for the given user.
    ///
    /// # Errors
    ///
    /// Returns `TokenError` if signing fails.
    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        let claims = Claims {
            id: user.id,
            email: user.email.to_string(),
            role: user.role,
            exp: (Utc::now() + self.ttl).timestamp(),
        };

        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding,
        )?)
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `TokenError` if the signature is invalid or the token has
    /// expired.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(
            token,
            &self.decoding,
            &Validation::new(Algorithm::HS256),
        )?;

        Ok(data.claims)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use matchday_core::Email;

    fn test_user(role: UserRole) -> User {
        User {
            id: UserId::new(42),
            email: Email::parse("shopper@example.com").unwrap(),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service() -> TokenService {
        TokenService::new(&SecretString::from("k9#mP2$xQ7!wR4@nL8^bV3&cZ6*dF1%g"), 5)
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let tokens = service();
        let token = tokens.issue(&test_user(UserRole::Admin)).unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.id, UserId::new(42));
        assert_eq!(claims.email, "shopper@example.com");
        assert_eq!(claims.role, UserRole::Admin);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(service().verify("not-a-token").is_err());
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = service().issue(&test_user(UserRole::User)).unwrap();

        let other = TokenService::new(&SecretString::from("z5&hJ8*wT2!qN6#vB9$mX4^kC7@pD3%r"), 5);
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_expired() {
        // A negative TTL produces an already-expired token
        let tokens = TokenService::new(
            &SecretString::from("k9#mP2$xQ7!wR4@nL8^bV3&cZ6*dF1%g"),
            -1,
        );
        let token = tokens.issue(&test_user(UserRole::User)).unwrap();
        assert!(tokens.verify(&token).is_err());
    }
}
