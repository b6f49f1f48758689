//! Authentication types for JWT and tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Marker value carried in the `type` claim of refresh tokens.
pub const REFRESH_TOKEN_TYPE: &str = "refresh";

/// JWT claims for access and refresh tokens.
///
/// The subject is the person's UUID rendered as a string; access tokens carry
/// no `type` claim while refresh tokens carry `type = "refresh"`. Verification
/// rejects a token presented as the wrong kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (person ID as a string).
    pub sub: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
    /// Token kind marker; `Some("refresh")` for refresh tokens.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

impl Claims {
    /// Creates access-token claims for a person.
    #[must_use]
    pub fn new_access(person_id: Uuid, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: person_id.to_string(),
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
            token_type: None,
        }
    }

    /// Creates refresh-token claims for a person.
    #[must_use]
    pub fn new_refresh(person_id: Uuid, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: person_id.to_string(),
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
            token_type: Some(REFRESH_TOKEN_TYPE.to_string()),
        }
    }

    /// Returns true if these claims belong to a refresh token.
    #[must_use]
    pub fn is_refresh(&self) -> bool {
        self.token_type.as_deref() == Some(REFRESH_TOKEN_TYPE)
    }
}

/// Token pair returned after successful authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Access token (short-lived).
    pub access_token: String,
    /// Refresh token (long-lived).
    pub refresh_token: String,
    /// Token scheme, always `"bearer"`.
    pub token_type: String,
}

impl TokenPair {
    /// Creates a new bearer token pair.
    #[must_use]
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Login request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Registration request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Unique username.
    pub username: String,
    /// First name.
    pub firstname: String,
    /// Last name.
    pub lastname: String,
    /// Gender.
    pub gender: String,
    /// Age.
    pub age: i32,
    /// Password (hashed before storage, never persisted raw).
    pub password: String,
    /// Optional profile emoji.
    pub profile_emoji: Option<String>,
}

/// Refresh token request.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshRequest {
    /// The refresh token.
    pub refresh_token: String,
}

/// Response for a refreshed access token.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshResponse {
    /// The newly minted access token.
    pub access_token: String,
    /// Token scheme, always `"bearer"`.
    pub token_type: String,
}
