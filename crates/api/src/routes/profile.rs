//! Profile routes for the authenticated person.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use serde::Deserialize;
use tracing::info;

use crate::middleware::auth::CurrentUser;
use crate::{ApiError, AppState};
use tally_core::auth::hash_password;
use tally_db::PersonRepository;
use tally_db::repositories::UpdatePersonInput;

/// Creates the profile router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me).patch(update_me))
        .route("/account", delete(delete_account))
}

/// Partial profile update payload. The password, when present, is re-hashed
/// before storage.
#[derive(Debug, Deserialize)]
struct UpdateProfileRequest {
    username: Option<String>,
    firstname: Option<String>,
    lastname: Option<String>,
    gender: Option<String>,
    age: Option<i32>,
    profile_emoji: Option<String>,
    password: Option<String>,
}

/// GET /me - Return the authenticated person's profile.
async fn get_me(user: CurrentUser) -> impl IntoResponse {
    // The password hash is skipped during serialization.
    Json(user.0)
}

/// PATCH /me - Apply a partial profile update.
async fn update_me(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let person_repo = PersonRepository::new((*state.db).clone());

    let password_hash = match payload.password.as_deref() {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };

    let person = person_repo
        .update_profile(
            user.id(),
            UpdatePersonInput {
                username: payload.username,
                firstname: payload.firstname,
                lastname: payload.lastname,
                gender: payload.gender,
                age: payload.age,
                profile_emoji: payload.profile_emoji,
                password_hash,
            },
        )
        .await?;

    Ok(Json(person))
}

/// DELETE /account - Delete the account and everything it owns.
async fn delete_account(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let person_repo = PersonRepository::new((*state.db).clone());
    person_repo.delete_account(user.id()).await?;

    info!(person_id = %user.id(), "account deleted");

    Ok(StatusCode::NO_CONTENT)
}
