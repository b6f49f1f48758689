//! Authentication routes for login, registration, and token refresh.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use tracing::info;

use crate::{ApiError, AppState};
use tally_core::auth::{hash_password, verify_password};
use tally_db::PersonRepository;
use tally_db::repositories::CreatePersonInput;
use tally_shared::auth::{
    LoginRequest, RefreshRequest, RefreshResponse, RegisterRequest, TokenPair,
};
use tally_shared::AppError;

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/token", post(login))
        .route("/refresh", post(refresh))
        .route("/register", post(register))
}

/// POST /token - Verify credentials and return a token pair.
///
/// A missing user and a wrong password produce the same 401 so usernames
/// cannot be probed.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let person_repo = PersonRepository::new((*state.db).clone());

    let invalid =
        || ApiError(AppError::Unauthorized("Invalid username or password".to_string()));

    let person = person_repo
        .find_by_username(&payload.username)
        .await?
        .ok_or_else(|| {
            info!(username = %payload.username, "login attempt for unknown username");
            invalid()
        })?;

    if !verify_password(&payload.password, &person.password_hash)? {
        info!(person_id = %person.id, "failed login attempt");
        return Err(invalid());
    }

    let access_token = state.jwt_service.issue_access_token(person.id)?;
    let refresh_token = state.jwt_service.issue_refresh_token(person.id)?;

    Ok(Json(TokenPair::new(access_token, refresh_token)))
}

/// POST /refresh - Exchange a refresh token for a new access token.
///
/// The presented refresh token stays valid until its own expiry; there is no
/// rotation. A refresh token whose subject no longer exists is rejected.
async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let person_id = state.jwt_service.verify_refresh_token(&payload.refresh_token)?;

    let person_repo = PersonRepository::new((*state.db).clone());
    let person = person_repo.find_by_id(person_id).await?.ok_or_else(|| {
        ApiError(AppError::Unauthorized("Invalid or malformed token".to_string()))
    })?;

    let access_token = state.jwt_service.issue_access_token(person.id)?;

    Ok(Json(RefreshResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// POST /register - Create an account and return a token pair.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let person_repo = PersonRepository::new((*state.db).clone());

    let password_hash = hash_password(&payload.password)?;

    let person = person_repo
        .create(CreatePersonInput {
            username: payload.username,
            firstname: payload.firstname,
            lastname: payload.lastname,
            gender: payload.gender,
            age: payload.age,
            profile_emoji: payload.profile_emoji,
            password_hash,
        })
        .await?;

    info!(person_id = %person.id, "account registered");

    let access_token = state.jwt_service.issue_access_token(person.id)?;
    let refresh_token = state.jwt_service.issue_refresh_token(person.id)?;

    Ok((
        StatusCode::CREATED,
        Json(TokenPair::new(access_token, refresh_token)),
    ))
}
