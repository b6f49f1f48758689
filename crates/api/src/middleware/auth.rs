//! Authentication middleware for protected routes.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::AppState;
use tally_db::PersonRepository;
use tally_db::entities::people;
use tally_shared::JwtError;

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

fn unauthorized(error: &str, message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": error, "message": message })),
    )
        .into_response()
}

/// Authentication middleware that validates JWT access tokens.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Verifies it as an ACCESS token (refresh tokens are rejected)
/// 3. Loads the person row and stores it in request extensions
///
/// A token whose subject no longer exists (deleted account) is rejected with
/// 401, the same as any other stale credential.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = auth_header.and_then(extract_bearer_token) else {
        return unauthorized(
            "missing_token",
            "Authorization header with Bearer token is required",
        );
    };

    let person_id = match state.jwt_service.verify_access_token(token) {
        Ok(id) => id,
        Err(JwtError::Expired) => {
            return unauthorized("token_expired", "Token has expired");
        }
        Err(_) => {
            return unauthorized("invalid_token", "Invalid or malformed token");
        }
    };

    let person_repo = PersonRepository::new((*state.db).clone());
    match person_repo.find_by_id(person_id).await {
        Ok(Some(person)) => {
            request.extensions_mut().insert(person);
            next.run(request).await
        }
        Ok(None) => unauthorized("invalid_token", "Invalid or malformed token"),
        Err(e) => {
            tracing::error!(error = %e, "failed to load person for auth");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An internal error occurred"
                })),
            )
                .into_response()
        }
    }
}

/// Extractor for the authenticated person.
///
/// Use this in handlers behind [`auth_middleware`]:
///
/// ```ignore
/// async fn handler(user: CurrentUser) -> impl IntoResponse {
///     let owner_id = user.id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub people::Model);

impl CurrentUser {
    /// Returns the person's ID.
    #[must_use]
    pub fn id(&self) -> uuid::Uuid {
        self.0.id
    }

    /// Returns the inner person row.
    #[must_use]
    pub fn person(&self) -> &people::Model {
        &self.0
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<people::Model>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "error": "unauthorized",
                        "message": "Authentication required"
                    })),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc123"), Some("abc123"));
        assert_eq!(extract_bearer_token("bearer abc123"), Some("abc123"));
        assert_eq!(extract_bearer_token("Basic abc123"), None);
        assert_eq!(extract_bearer_token("abc123"), None);
    }
}
