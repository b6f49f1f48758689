//! JWT token generation and validation.
//!
//! Issues stateless access and refresh tokens signed with a single shared
//! HS256 secret. There is no rotation or revocation list: refreshing mints a
//! new access token while the presented refresh token stays valid until its
//! own expiry.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::Claims;

/// JWT configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token lifetime in seconds.
    pub access_token_expiry_secs: i64,
    /// Refresh token lifetime in seconds.
    pub refresh_token_expiry_secs: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            access_token_expiry_secs: 86_400,
            refresh_token_expiry_secs: 604_800,
        }
    }
}

/// Errors that can occur during JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Token encoding failed.
    #[error("failed to encode token: {0}")]
    EncodingError(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,

    /// Token signature is invalid or the token is malformed.
    #[error("invalid token")]
    Invalid,

    /// Token is of the wrong kind (access where refresh is required, or
    /// vice versa).
    #[error("wrong token type")]
    WrongTokenType,

    /// The subject claim is missing or not a valid person ID.
    #[error("invalid token subject")]
    InvalidSubject,
}

/// JWT service for token operations.
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish_non_exhaustive()
    }
}

impl JwtService {
    /// Creates a new JWT service with the given configuration.
    #[must_use]
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issues an access token for a person with the default lifetime.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if token generation fails.
    pub fn issue_access_token(&self, person_id: Uuid) -> Result<String, JwtError> {
        self.issue_access_token_with_ttl(
            person_id,
            Duration::seconds(self.config.access_token_expiry_secs),
        )
    }

    /// Issues an access token with an explicit lifetime.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if token generation fails.
    pub fn issue_access_token_with_ttl(
        &self,
        person_id: Uuid,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        let claims = Claims::new_access(person_id, Utc::now() + ttl);
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Issues a refresh token for a person.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if token generation fails.
    pub fn issue_refresh_token(&self, person_id: Uuid) -> Result<String, JwtError> {
        let expires_at = Utc::now() + Duration::seconds(self.config.refresh_token_expiry_secs);
        let claims = Claims::new_refresh(person_id, expires_at);
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Verifies an access token and returns its subject.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Expired` if the token has expired,
    /// `JwtError::WrongTokenType` for a refresh token, and
    /// `JwtError::InvalidSubject` when the subject is not a valid person ID.
    pub fn verify_access_token(&self, token: &str) -> Result<Uuid, JwtError> {
        let claims = self.decode_claims(token)?;
        if claims.is_refresh() {
            return Err(JwtError::WrongTokenType);
        }
        claims.sub.parse().map_err(|_| JwtError::InvalidSubject)
    }

    /// Verifies a refresh token and returns its subject.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::WrongTokenType` unless the `type` claim is
    /// `"refresh"`; other failures as for [`Self::verify_access_token`].
    pub fn verify_refresh_token(&self, token: &str) -> Result<Uuid, JwtError> {
        let claims = self.decode_claims(token)?;
        if !claims.is_refresh() {
            return Err(JwtError::WrongTokenType);
        }
        claims.sub.parse().map_err(|_| JwtError::InvalidSubject)
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::default();
        // Zero leeway so expiry is exact and deterministic under test.
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Invalid,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> JwtService {
        JwtService::new(JwtConfig {
            secret: "test-secret-key-for-testing".to_string(),
            ..JwtConfig::default()
        })
    }

    #[test]
    fn test_access_token_round_trip() {
        let service = create_test_service();
        let person_id = Uuid::new_v4();

        let token = service.issue_access_token(person_id).unwrap();
        let subject = service.verify_access_token(&token).unwrap();

        assert_eq!(subject, person_id);
    }

    #[test]
    fn test_refresh_token_round_trip() {
        let service = create_test_service();
        let person_id = Uuid::new_v4();

        let token = service.issue_refresh_token(person_id).unwrap();
        let subject = service.verify_refresh_token(&token).unwrap();

        assert_eq!(subject, person_id);
    }

    #[test]
    fn test_access_token_rejected_as_refresh() {
        let service = create_test_service();
        let token = service.issue_access_token(Uuid::new_v4()).unwrap();

        assert!(matches!(
            service.verify_refresh_token(&token),
            Err(JwtError::WrongTokenType)
        ));
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let service = create_test_service();
        let token = service.issue_refresh_token(Uuid::new_v4()).unwrap();

        assert!(matches!(
            service.verify_access_token(&token),
            Err(JwtError::WrongTokenType)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = create_test_service();
        let token = service
            .issue_access_token_with_ttl(Uuid::new_v4(), Duration::seconds(-60))
            .unwrap();

        assert!(matches!(
            service.verify_access_token(&token),
            Err(JwtError::Expired)
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = create_test_service();
        assert!(matches!(
            service.verify_access_token("invalid.token.here"),
            Err(JwtError::Invalid)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = create_test_service();
        let other = JwtService::new(JwtConfig {
            secret: "a-different-secret".to_string(),
            ..JwtConfig::default()
        });

        let token = service.issue_access_token(Uuid::new_v4()).unwrap();
        assert!(matches!(
            other.verify_access_token(&token),
            Err(JwtError::Invalid)
        ));
    }

    #[test]
    fn test_non_uuid_subject_rejected() {
        let service = create_test_service();
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
            token_type: None,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret-key-for-testing"),
        )
        .unwrap();

        assert!(matches!(
            service.verify_access_token(&token),
            Err(JwtError::InvalidSubject)
        ));
    }
}
